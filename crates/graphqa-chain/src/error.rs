//! Error types for the graphqa-chain crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Graph error: {0}")]
    Graph(#[from] graphqa_graph::GraphError),

    #[error("Model service network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Model service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse model response: {0}")]
    Parse(String),

    #[error("Generated Cypher writes to the graph: {cypher}")]
    UnsafeQuery { cypher: String },
}

pub type Result<T> = std::result::Result<T, ChainError>;
