//! The Cypher question-answering chain.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use graphqa_graph::{GraphStore, JsonRow};

use crate::cypher::{contains_write_clause, extract_cypher};
use crate::error::{ChainError, Result};
use crate::llm::ChatModel;
use crate::prompts::{cypher_generation_prompt, qa_prompt};

/// The pipeline handle: one question in, one loosely-typed response out.
///
/// Responses from [`CypherQaChain`] are objects of the form
/// `{"query": ..., "result": ...}`, but callers must not rely on that shape.
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str) -> Result<Value>;
}

/// Tuning for [`CypherQaChain`].
#[derive(Debug, Clone)]
pub struct ChainOptions {
    /// Maximum rows passed to the model as context.
    pub top_k: usize,
    /// Run generated statements that write to the graph.
    pub allow_writes: bool,
    /// Attach the generated Cypher and its rows to the response.
    pub return_intermediate_steps: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            top_k: 10,
            allow_writes: false,
            return_intermediate_steps: false,
        }
    }
}

/// Question → Cypher → rows → answer.
pub struct CypherQaChain {
    graph: Arc<dyn GraphStore>,
    model: Arc<dyn ChatModel>,
    schema: String,
    options: ChainOptions,
}

impl CypherQaChain {
    /// Build a chain over `graph` using `model` for both generation steps.
    ///
    /// `schema` is the rendered schema text; it is captured once and not
    /// refreshed.
    pub fn new(
        graph: Arc<dyn GraphStore>,
        model: Arc<dyn ChatModel>,
        schema: impl Into<String>,
        options: ChainOptions,
    ) -> Self {
        Self {
            graph,
            model,
            schema: schema.into(),
            options,
        }
    }

    async fn generate_cypher(&self, question: &str) -> Result<String> {
        let prompt = cypher_generation_prompt(&self.schema, question);
        let completion = self.model.complete(&prompt).await?;
        Ok(extract_cypher(&completion))
    }

    async fn run_cypher(&self, cypher: &str) -> Result<Vec<JsonRow>> {
        if cypher.is_empty() {
            return Ok(Vec::new());
        }
        if !self.options.allow_writes && contains_write_clause(cypher) {
            return Err(ChainError::UnsafeQuery {
                cypher: cypher.to_string(),
            });
        }
        Ok(self.graph.query_json(cypher, self.options.top_k).await?)
    }
}

#[async_trait]
impl QuestionAnswerer for CypherQaChain {
    async fn answer(&self, question: &str) -> Result<Value> {
        let cypher = self.generate_cypher(question).await?;
        tracing::info!(model = self.model.model_name(), cypher = %cypher, "Generated Cypher");

        let context = self.run_cypher(&cypher).await?;
        tracing::info!(
            rows = context.len(),
            context = %serde_json::to_string(&context).unwrap_or_default(),
            "Full context"
        );

        let answer = self.model.complete(&qa_prompt(&context, question)).await?;

        let mut response = json!({
            "query": question,
            "result": answer.trim(),
        });
        if self.options.return_intermediate_steps {
            response["intermediate_steps"] = json!([
                { "query": cypher },
                { "context": context },
            ]);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use graphqa_graph::GraphError;

    use super::*;

    /// Replays canned completions and records every prompt.
    struct ScriptedModel {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ChainError::Parse("no scripted reply".to_string()))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    /// Returns fixed rows and records every statement it runs.
    struct FixedGraph {
        rows: Vec<JsonRow>,
        statements: Mutex<Vec<(String, usize)>>,
        fail: bool,
    }

    impl FixedGraph {
        fn new(rows: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                rows: rows
                    .into_iter()
                    .map(|r| r.as_object().cloned().unwrap_or_default())
                    .collect(),
                statements: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                rows: Vec::new(),
                statements: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn statements(&self) -> Vec<(String, usize)> {
            self.statements.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphStore for FixedGraph {
        async fn query_json(
            &self,
            cypher: &str,
            limit: usize,
        ) -> std::result::Result<Vec<JsonRow>, GraphError> {
            self.statements
                .lock()
                .unwrap()
                .push((cypher.to_string(), limit));
            if self.fail {
                return Err(GraphError::Connection("connection refused".to_string()));
            }
            Ok(self.rows.iter().take(limit).cloned().collect())
        }
    }

    const CASINO_CYPHER: &str =
        "MATCH (p:Person)-[:DIRECTED]->(m:Movie {title: 'Casino'}) RETURN p.name";

    fn chain(graph: Arc<FixedGraph>, model: Arc<ScriptedModel>, options: ChainOptions) -> CypherQaChain {
        CypherQaChain::new(graph, model, "Node properties:\nMovie {title: STRING}", options)
    }

    #[tokio::test]
    async fn test_answer_runs_full_pipeline() {
        let graph = FixedGraph::new(vec![json!({"p.name": "Martin Scorsese"})]);
        let fenced = format!("```cypher\n{CASINO_CYPHER}\n```");
        let model = ScriptedModel::new(&[fenced.as_str(), " Martin Scorsese \n"]);
        let qa = chain(graph.clone(), model.clone(), ChainOptions::default());

        let response = qa
            .answer("Who was the director of the movie Casino")
            .await
            .unwrap();

        assert_eq!(
            response,
            json!({
                "query": "Who was the director of the movie Casino",
                "result": "Martin Scorsese",
            })
        );
        assert_eq!(graph.statements(), vec![(CASINO_CYPHER.to_string(), 10)]);

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("Movie {title: STRING}"));
        assert!(prompts[0].contains("Who was the director of the movie Casino"));
        assert!(prompts[1].contains("Martin Scorsese"));
    }

    #[tokio::test]
    async fn test_top_k_limits_context() {
        let rows = (0..20).map(|i| json!({ "i": i })).collect();
        let graph = FixedGraph::new(rows);
        let model = ScriptedModel::new(&["UNWIND range(0, 19) AS i RETURN i", "many"]);
        let options = ChainOptions {
            top_k: 3,
            ..ChainOptions::default()
        };
        let qa = chain(graph.clone(), model.clone(), options);

        qa.answer("count").await.unwrap();

        assert_eq!(graph.statements()[0].1, 3);
        assert!(model.prompts()[1].contains(r#"[{"i":0},{"i":1},{"i":2}]"#));
    }

    #[tokio::test]
    async fn test_intermediate_steps() {
        let graph = FixedGraph::new(vec![json!({"p.name": "Martin Scorsese"})]);
        let model = ScriptedModel::new(&[CASINO_CYPHER, "Martin Scorsese"]);
        let options = ChainOptions {
            return_intermediate_steps: true,
            ..ChainOptions::default()
        };
        let qa = chain(graph, model, options);

        let response = qa.answer("Who directed Casino?").await.unwrap();

        assert_eq!(response["intermediate_steps"][0]["query"], CASINO_CYPHER);
        assert_eq!(
            response["intermediate_steps"][1]["context"],
            json!([{"p.name": "Martin Scorsese"}])
        );
    }

    #[tokio::test]
    async fn test_write_statement_rejected() {
        let graph = FixedGraph::new(Vec::new());
        let model = ScriptedModel::new(&["MATCH (n) DETACH DELETE n", "unused"]);
        let qa = chain(graph.clone(), model, ChainOptions::default());

        let err = qa.answer("delete everything").await.unwrap_err();

        assert!(matches!(err, ChainError::UnsafeQuery { .. }));
        assert!(graph.statements().is_empty());
    }

    #[tokio::test]
    async fn test_procedure_write_rejected() {
        let graph = FixedGraph::new(Vec::new());
        let model = ScriptedModel::new(&[
            "CALL apoc.cypher.doIt('MATCH (n) DETACH DELETE n', {}) YIELD value RETURN value",
            "unused",
        ]);
        let qa = chain(graph.clone(), model, ChainOptions::default());

        let err = qa.answer("clean up").await.unwrap_err();

        assert!(matches!(err, ChainError::UnsafeQuery { .. }));
        assert!(graph.statements().is_empty());
    }

    #[tokio::test]
    async fn test_write_statement_allowed_when_enabled() {
        let graph = FixedGraph::new(Vec::new());
        let model = ScriptedModel::new(&["CREATE (m:Movie {title: 'Heat'})", "Done."]);
        let options = ChainOptions {
            allow_writes: true,
            ..ChainOptions::default()
        };
        let qa = chain(graph.clone(), model, options);

        let response = qa.answer("add Heat").await.unwrap();

        assert_eq!(response["result"], "Done.");
        assert_eq!(graph.statements().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cypher_skips_graph() {
        let graph = FixedGraph::new(vec![json!({"x": 1})]);
        let model = ScriptedModel::new(&["", "I don't know the answer."]);
        let qa = chain(graph.clone(), model.clone(), ChainOptions::default());

        let response = qa.answer("What is the weather?").await.unwrap();

        assert_eq!(response["result"], "I don't know the answer.");
        assert!(graph.statements().is_empty());
        assert!(model.prompts()[1].contains("Information:\n[]\n"));
    }

    #[tokio::test]
    async fn test_graph_error_propagates() {
        let graph = FixedGraph::failing();
        let model = ScriptedModel::new(&[CASINO_CYPHER, "unused"]);
        let qa = chain(graph, model.clone(), ChainOptions::default());

        let err = qa.answer("Who directed Casino?").await.unwrap_err();

        assert!(matches!(err, ChainError::Graph(_)));
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let graph = FixedGraph::new(Vec::new());
        let model = ScriptedModel::new(&[]);
        let qa = chain(graph.clone(), model, ChainOptions::default());

        assert!(qa.answer("anything").await.is_err());
        assert!(graph.statements().is_empty());
    }
}
