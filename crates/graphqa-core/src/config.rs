//! Process configuration.
//!
//! Loaded from (in priority order):
//! 1. Unprefixed environment variables for the connection values
//!    (`NEO4J_URI`, `NEO4J_USERNAME`, `NEO4J_PASSWORD`, `GROQ_API_KEY`)
//! 2. `GRAPHQA_`-prefixed environment variables for tuning values
//! 3. Config file (`graphqa.toml`, optional)
//! 4. Defaults
//!
//! The four connection values have no defaults and are not validated here.
//! An absent value loads as an empty string and fails later, at the graph
//! connect call or at the first model request.

use serde::Deserialize;

use crate::error::Result;

/// Immutable configuration record for one process run.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j_uri: String,

    #[serde(default)]
    pub neo4j_username: String,

    #[serde(default)]
    pub neo4j_password: String,

    #[serde(default)]
    pub groq_api_key: String,

    /// Model identifier sent with every chat request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible chat API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP listen address for the form server.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Maximum number of result rows handed to the model as context.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Allow generated Cypher that writes to the graph.
    #[serde(default)]
    pub allow_writes: bool,

    /// Include the generated Cypher and its rows in pipeline responses.
    #[serde(default)]
    pub return_intermediate_steps: bool,
}

/// Connection values read from unprefixed environment variables.
const CONNECTION_VARS: [(&str, &str); 4] = [
    ("neo4j_uri", "NEO4J_URI"),
    ("neo4j_username", "NEO4J_USERNAME"),
    ("neo4j_password", "NEO4J_PASSWORD"),
    ("groq_api_key", "GROQ_API_KEY"),
];

fn default_model() -> String {
    "Gemma2-9b-It".to_string()
}

fn default_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_listen() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_top_k() -> usize {
    10
}

impl Settings {
    /// Load settings from `<file_prefix>.toml` (optional) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(config::Environment::with_prefix("GRAPHQA").try_parsing(true));

        for (key, var) in CONNECTION_VARS {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        let cfg = builder.build()?;

        let settings = Self::from_config(cfg)?;
        settings.warn_missing();
        Ok(settings)
    }

    /// Deserialize settings from an already-built config tree.
    pub fn from_config(cfg: config::Config) -> Result<Self> {
        Ok(cfg.try_deserialize::<Settings>()?)
    }

    /// Names of the connection values that are absent or empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let values = [
            &self.neo4j_uri,
            &self.neo4j_username,
            &self.neo4j_password,
            &self.groq_api_key,
        ];
        CONNECTION_VARS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_empty())
            .map(|((_, var), _)| *var)
            .collect()
    }

    fn warn_missing(&self) {
        for key in self.missing_keys() {
            tracing::warn!(key, "Connection setting not set");
        }
    }
}
