//! Read seam between the question-answering pipeline and the database.

use async_trait::async_trait;

use crate::client::{GraphClient, GraphError, JsonRow};

/// Anything that can run a generated Cypher statement and hand back rows.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute `cypher` and return at most `limit` rows.
    async fn query_json(&self, cypher: &str, limit: usize) -> Result<Vec<JsonRow>, GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn query_json(&self, cypher: &str, limit: usize) -> Result<Vec<JsonRow>, GraphError> {
        GraphClient::query_json(self, cypher, limit).await
    }
}
