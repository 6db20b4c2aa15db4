//! graphqa-chain: question-answering pipeline over a graph database.
//!
//! A question goes through two model calls with one database round trip in
//! between:
//! 1. the model writes a Cypher statement from the schema and the question
//! 2. the statement runs against the graph
//! 3. the model phrases the returned rows as an answer
//!
//! The presentation layer depends only on [`QuestionAnswerer`].

pub mod chain;
pub mod cypher;
pub mod error;
pub mod llm;
pub mod prompts;

pub use chain::{ChainOptions, CypherQaChain, QuestionAnswerer};
pub use error::ChainError;
pub use llm::{ChatModel, GroqChat, ModelConfig};
