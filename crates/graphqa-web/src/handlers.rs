//! Routes: `GET /` shows the idle form, `POST /` handles a submission.

use std::time::Instant;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use graphqa_core::response::DEFAULT_QUESTION;
use graphqa_core::AnswerOutcome;

use crate::error::WebError;
use crate::page::{render_page, Submission};
use crate::AppState;

/// Form body of a submission.
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health))
        .with_state(state)
}

/// GET / - the form in its idle state.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.schema, DEFAULT_QUESTION, None))
}

/// POST / - answer one question.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>, WebError> {
    let submission = ask(&state, &form.query).await?;
    Ok(Html(render_page(&state.schema, &form.query, Some(&submission))))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Run one submission through the pipeline.
///
/// An empty question never reaches the pipeline. Otherwise the pipeline is
/// called exactly once, on its own task, with the question unchanged.
pub async fn ask(state: &AppState, question: &str) -> Result<Submission, WebError> {
    if question.is_empty() {
        tracing::debug!("Empty question submitted");
        return Ok(Submission::Warning);
    }

    let started = Instant::now();
    let pipeline = state.pipeline.clone();
    let owned = question.to_string();
    let response = tokio::spawn(async move { pipeline.answer(&owned).await }).await??;

    let outcome = AnswerOutcome::from_response(&response);
    if outcome == AnswerOutcome::MalformedResponse {
        tracing::warn!(question, "Pipeline returned a non-mapping response");
    }
    tracing::info!(
        question,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Question answered"
    );
    Ok(Submission::from(outcome))
}
