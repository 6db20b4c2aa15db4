//! graphqa-core: Shared configuration, error handling, and response types.
//!
//! This crate provides the pieces every graphqa component agrees on:
//! - The process configuration record, loaded once at startup
//! - The mapping from a loosely-typed pipeline response to a typed outcome
//! - Common error types

pub mod config;
pub mod error;
pub mod response;

pub use config::Settings;
pub use error::GraphQaError;
pub use response::AnswerOutcome;
