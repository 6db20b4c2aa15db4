//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Query};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A result row keyed by column name.
pub type JsonRow = serde_json::Map<String, serde_json::Value>;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl GraphConfig {
    pub fn new(uri: &str, user: &str, password: &str) -> Self {
        Self {
            uri: uri.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Run a Cypher statement and return at most `limit` rows as JSON objects.
    ///
    /// Nodes and relationships come back as their property maps; lists and
    /// maps are converted recursively. Rows past `limit` are still pulled so
    /// the connection goes back to the pool with the result fully consumed.
    pub async fn query_json(&self, cypher: &str, limit: usize) -> Result<Vec<JsonRow>, GraphError> {
        let mut stream = self.graph.execute(neo4rs::query(cypher)).await?;
        let mut rows = Vec::new();
        let mut skipped = 0usize;
        while let Some(row) = stream.next().await? {
            if rows.len() >= limit {
                skipped += 1;
                continue;
            }
            let json = row
                .to::<JsonRow>()
                .map_err(|e| GraphError::Serialization(format!("Failed to convert row: {e}")))?;
            rows.push(json);
        }
        tracing::debug!(rows = rows.len(), skipped, limit, "Query rows collected");
        Ok(rows)
    }
}
