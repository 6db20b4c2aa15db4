//! graphqa-web: the question form.
//!
//! One page with the graph schema, a question field and a submit button.
//! Each submission runs the pipeline once and shows exactly one of an
//! answer, a warning or an error.

pub mod error;
pub mod handlers;
pub mod page;

use std::sync::Arc;

use graphqa_chain::QuestionAnswerer;

pub use handlers::router;

/// Handles shared by every request. Built once at startup, never mutated.
#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<str>,
    pub pipeline: Arc<dyn QuestionAnswerer>,
}

impl AppState {
    pub fn new(schema: impl Into<Arc<str>>, pipeline: Arc<dyn QuestionAnswerer>) -> Self {
        Self {
            schema: schema.into(),
            pipeline,
        }
    }
}
