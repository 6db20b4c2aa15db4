//! Typed view of a question-answering pipeline response.
//!
//! The pipeline hands back loosely-typed JSON. It is mapped into
//! [`AnswerOutcome`] exactly once, here, so rendering code never probes
//! the shape of the response itself.

use serde_json::Value;

/// Key holding the answer text in a pipeline response.
pub const RESULT_KEY: &str = "result";

/// Shown when the response is a mapping without a `result` key.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer found";

/// Shown when the response is not a mapping at all.
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected response format. Please try again.";

/// Shown when the form is submitted with an empty question.
pub const EMPTY_QUERY_WARNING: &str = "Please enter a query to get an answer.";

/// Pre-filled question in the input field.
pub const DEFAULT_QUESTION: &str = "Who was the director of the movie Casino";

/// What a pipeline response means for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// A mapping carrying a `result` value.
    Answer(String),
    /// A mapping without a `result` key.
    EmptyAnswer,
    /// Anything that is not a mapping.
    MalformedResponse,
}

impl AnswerOutcome {
    pub fn from_response(response: &Value) -> Self {
        match response {
            Value::Object(map) => match map.get(RESULT_KEY) {
                Some(Value::String(text)) => Self::Answer(text.clone()),
                // Non-string results are shown as their JSON text.
                Some(other) => Self::Answer(other.to_string()),
                None => Self::EmptyAnswer,
            },
            _ => Self::MalformedResponse,
        }
    }

    /// The answer text to display, if this outcome renders as an answer.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Self::Answer(text) => Some(text),
            Self::EmptyAnswer => Some(NO_ANSWER_PLACEHOLDER),
            Self::MalformedResponse => None,
        }
    }
}

impl From<Value> for AnswerOutcome {
    fn from(response: Value) -> Self {
        Self::from_response(&response)
    }
}
