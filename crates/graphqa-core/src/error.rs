use thiserror::Error;

/// Top-level error type for shared graphqa operations.
#[derive(Error, Debug)]
pub enum GraphQaError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GraphQaError>;
