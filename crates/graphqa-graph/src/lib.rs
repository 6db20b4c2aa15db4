//! graphqa-graph: Neo4j client for the question-answering pipeline.
//!
//! Owns the single connection pool to the graph database. The pipeline
//! reads through the [`GraphStore`] seam so it can run against a fake in
//! tests; the form reads the schema once at startup for display.

pub mod client;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError, JsonRow};
pub use schema::GraphSchema;
pub use store::GraphStore;
