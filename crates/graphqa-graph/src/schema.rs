//! Schema introspection.
//!
//! Reads node labels, relationship types, their property types, and the
//! `(:A)-[:R]->(:B)` patterns present in the database, and renders them as
//! the text block shown on the form and fed into the Cypher prompt.

use std::collections::BTreeMap;
use std::fmt;

use neo4rs::query;

use crate::client::{GraphClient, GraphError};

/// Upper bound on distinct relationship patterns collected.
const PATTERN_LIMIT: i64 = 1000;

/// One property of a node label or relationship type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySchema {
    pub name: String,
    pub type_name: String,
}

/// A node label or relationship type with its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: String,
    pub properties: Vec<PropertySchema>,
}

/// A relationship pattern observed in the data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RelationshipPattern {
    pub start: String,
    pub rel_type: String,
    pub end: String,
}

/// A raw row from `db.schema.nodeTypeProperties()` or
/// `db.schema.relTypeProperties()`.
#[derive(Debug, Clone)]
pub struct PropertyRow {
    pub owner: String,
    pub property: Option<String>,
    pub types: Vec<String>,
}

/// Snapshot of the database schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSchema {
    pub nodes: Vec<EntitySchema>,
    pub relationships: Vec<EntitySchema>,
    pub patterns: Vec<RelationshipPattern>,
}

impl GraphSchema {
    /// Assemble a schema from introspection rows.
    pub fn from_rows(
        node_rows: Vec<PropertyRow>,
        rel_rows: Vec<PropertyRow>,
        mut patterns: Vec<RelationshipPattern>,
    ) -> Self {
        patterns.sort();
        patterns.dedup();
        Self {
            nodes: group_properties(node_rows),
            relationships: group_properties(rel_rows),
            patterns,
        }
    }
}

impl fmt::Display for GraphSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node properties:")?;
        for node in &self.nodes {
            writeln!(f, "{}", EntityLine(node))?;
        }
        writeln!(f, "Relationship properties:")?;
        for rel in &self.relationships {
            writeln!(f, "{}", EntityLine(rel))?;
        }
        write!(f, "The relationships:")?;
        for p in &self.patterns {
            write!(f, "\n(:{})-[:{}]->(:{})", p.start, p.rel_type, p.end)?;
        }
        Ok(())
    }
}

struct EntityLine<'a>(&'a EntitySchema);

impl fmt::Display for EntityLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let props: Vec<String> = self
            .0
            .properties
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name))
            .collect();
        write!(f, "{} {{{}}}", self.0.name, props.join(", "))
    }
}

fn group_properties(rows: Vec<PropertyRow>) -> Vec<EntitySchema> {
    let mut grouped: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for row in rows {
        let entry = grouped.entry(row.owner).or_default();
        if let Some(name) = row.property {
            entry.insert(name, property_type_name(&row.types));
        }
    }
    grouped
        .into_iter()
        .map(|(name, props)| EntitySchema {
            name,
            properties: props
                .into_iter()
                .map(|(name, type_name)| PropertySchema { name, type_name })
                .collect(),
        })
        .collect()
}

/// Map Neo4j's procedure type names (`String`, `Long`, `StringArray`, ...)
/// onto the Cypher type names used in prompts.
pub fn property_type_name(types: &[String]) -> String {
    let mut names: Vec<String> = types
        .iter()
        .map(|t| match t.as_str() {
            "String" => "STRING".to_string(),
            "Long" | "Integer" => "INTEGER".to_string(),
            "Double" | "Float" => "FLOAT".to_string(),
            "Boolean" => "BOOLEAN".to_string(),
            "Date" => "DATE".to_string(),
            "DateTime" => "DATE_TIME".to_string(),
            "LocalDateTime" => "LOCAL_DATE_TIME".to_string(),
            "Time" => "TIME".to_string(),
            "LocalTime" => "LOCAL_TIME".to_string(),
            "Duration" => "DURATION".to_string(),
            "Point" => "POINT".to_string(),
            other if other.ends_with("Array") => "LIST".to_string(),
            other => other.to_uppercase(),
        })
        .collect();
    names.dedup();
    if names.is_empty() {
        "ANY".to_string()
    } else {
        names.join(" | ")
    }
}

/// Drop the leading colon and backtick quoting from a `relType` value.
fn strip_rel_type(raw: &str) -> String {
    raw.trim_start_matches(':').trim_matches('`').to_string()
}

impl GraphClient {
    /// Introspect the database schema.
    pub async fn refresh_schema(&self) -> Result<GraphSchema, GraphError> {
        let node_rows = self
            .query_rows(query(
                "CALL db.schema.nodeTypeProperties()
                 YIELD nodeLabels, propertyName, propertyTypes
                 RETURN nodeLabels, propertyName, propertyTypes",
            ))
            .await?
            .into_iter()
            .map(|row| {
                let labels: Vec<String> = row.get("nodeLabels").unwrap_or_default();
                PropertyRow {
                    owner: labels.join(":"),
                    property: row.get::<Option<String>>("propertyName").unwrap_or_default(),
                    types: row
                        .get::<Option<Vec<String>>>("propertyTypes")
                        .unwrap_or_default()
                        .unwrap_or_default(),
                }
            })
            .filter(|r| !r.owner.is_empty())
            .collect();

        let rel_rows = self
            .query_rows(query(
                "CALL db.schema.relTypeProperties()
                 YIELD relType, propertyName, propertyTypes
                 RETURN relType, propertyName, propertyTypes",
            ))
            .await?
            .into_iter()
            .map(|row| PropertyRow {
                owner: strip_rel_type(&row.get::<String>("relType").unwrap_or_default()),
                property: row.get::<Option<String>>("propertyName").unwrap_or_default(),
                types: row
                    .get::<Option<Vec<String>>>("propertyTypes")
                    .unwrap_or_default()
                    .unwrap_or_default(),
            })
            .filter(|r| !r.owner.is_empty())
            .collect();

        let patterns = self
            .query_rows(
                query(
                    "MATCH (a)-[r]->(b)
                     WITH labels(a) AS start, type(r) AS rel_type, labels(b) AS end
                     RETURN DISTINCT start, rel_type, end
                     LIMIT $limit",
                )
                .param("limit", PATTERN_LIMIT),
            )
            .await?
            .into_iter()
            .filter_map(|row| {
                let start: Vec<String> = row.get("start").unwrap_or_default();
                let end: Vec<String> = row.get("end").unwrap_or_default();
                let rel_type: String = row.get("rel_type").unwrap_or_default();
                Some(RelationshipPattern {
                    start: start.first()?.clone(),
                    rel_type,
                    end: end.first()?.clone(),
                })
            })
            .collect();

        let schema = GraphSchema::from_rows(node_rows, rel_rows, patterns);
        tracing::info!(
            node_labels = schema.nodes.len(),
            rel_types = schema.relationships.len(),
            patterns = schema.patterns.len(),
            "Graph schema refreshed"
        );
        Ok(schema)
    }
}
