//! Error types for the graphqa-web crate.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::page;

/// Failures that end the current interaction with an error page.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] graphqa_chain::ChainError),

    #[error("Pipeline task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(page::render_error_page(&self.to_string())),
        )
            .into_response()
    }
}
