//! HTML rendering for the question form.

use std::fmt::Write;

use graphqa_core::response::{AnswerOutcome, EMPTY_QUERY_WARNING, UNEXPECTED_FORMAT_MESSAGE};

pub const PAGE_TITLE: &str = "Graph Database Question Answering";

const STYLE: &str = r#"
body { background-color: #1e1e1e; color: #ffffff; font-family: 'Arial', sans-serif; margin: 2rem auto; max-width: 48rem; }
h1 { color: #ff6347; font-weight: bold; font-size: 32px; }
h2 { color: #ffa07a; font-weight: bold; font-size: 24px; }
pre.schema { background-color: #2e2e2e; padding: 10px; border-radius: 5px; white-space: pre-wrap; }
input[type=text] { background-color: #2e2e2e; color: #ffffff; border: 1px solid #ffa07a; border-radius: 5px; padding: 8px; width: 100%; box-sizing: border-box; }
button { background-color: #ff6347; color: #ffffff; border-radius: 5px; padding: 10px 20px; border: none; font-weight: bold; margin-top: 10px; }
button:hover { background-color: #ffa07a; color: #1e1e1e; }
.answer { background-color: #2e2e2e; padding: 10px; border-radius: 5px; border: 1px solid #ffa07a; }
.warning { background-color: #3d3415; color: #ffd866; padding: 10px; border-radius: 5px; }
.error { background-color: #3e1f1f; color: #ff8080; padding: 10px; border-radius: 5px; }
"#;

/// What the output region shows after a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The question was empty; the pipeline was not called.
    Warning,
    Answer(String),
    /// The pipeline response had an unexpected shape.
    Error,
}

impl From<AnswerOutcome> for Submission {
    fn from(outcome: AnswerOutcome) -> Self {
        match outcome.answer_text() {
            Some(text) => Self::Answer(text.to_string()),
            None => Self::Error,
        }
    }
}

impl Submission {
    /// The user-visible message.
    pub fn message(&self) -> &str {
        match self {
            Self::Warning => EMPTY_QUERY_WARNING,
            Self::Answer(text) => text,
            Self::Error => UNEXPECTED_FORMAT_MESSAGE,
        }
    }
}

/// Render the full page. `submission` is `None` in the idle state.
pub fn render_page(schema: &str, query: &str, submission: Option<&Submission>) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>{title}</h1>\n\
         <h2>Graph Schema</h2>\n\
         <pre class=\"schema\">{schema}</pre>\n\
         <h2>Ask a Question</h2>\n\
         <form method=\"post\" action=\"/\">\n\
         <label for=\"query\">Enter your query:</label>\n\
         <input type=\"text\" id=\"query\" name=\"query\" value=\"{query}\">\n\
         <button type=\"submit\">Get Answer</button>\n\
         </form>\n",
        title = PAGE_TITLE,
        schema = escape_html(schema),
        query = escape_html(query),
    );

    match submission {
        None => {}
        Some(Submission::Answer(text)) => {
            let _ = write!(
                body,
                "<h2>Answer</h2>\n<div class=\"answer\" id=\"output\">{}</div>\n",
                escape_html(text)
            );
        }
        Some(Submission::Warning) => {
            let _ = write!(
                body,
                "<div class=\"warning\" id=\"output\">{}</div>\n",
                escape_html(EMPTY_QUERY_WARNING)
            );
        }
        Some(Submission::Error) => {
            let _ = write!(
                body,
                "<div class=\"error\" id=\"output\">{}</div>\n",
                escape_html(UNEXPECTED_FORMAT_MESSAGE)
            );
        }
    }

    document(PAGE_TITLE, &body)
}

/// Page shown when an interaction fails outright.
pub fn render_error_page(detail: &str) -> String {
    let body = format!(
        "<h1>{PAGE_TITLE}</h1>\n\
         <div class=\"error\" id=\"output\">{}</div>\n\
         <p><a href=\"/\">Back</a></p>\n",
        escape_html(detail)
    );
    document("Error", &body)
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
