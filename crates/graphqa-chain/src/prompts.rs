//! Prompt templates for the two model calls.

use graphqa_graph::JsonRow;

const CYPHER_GENERATION_TEMPLATE: &str = "\
Task: Write a Cypher statement that queries a Neo4j graph database.
Instructions:
Use only the node labels, relationship types and properties listed in the schema.
Do not invent relationship types or properties that are not listed.
Schema:
{schema}
Reply with the Cypher statement only. No explanations, no apologies.
If the question is not something a Cypher statement can answer, reply with nothing.

The question is:
{question}";

const CYPHER_QA_TEMPLATE: &str = "\
You turn database results into short answers people can read.
The information below was returned by the database and is authoritative.
Do not correct it from your own knowledge, and do not mention that the answer
comes from provided information. Phrase the answer as a reply to the question.

Example:
Question: Which actors played in Heat?
Information: [{\"name\": \"Al Pacino\"}, {\"name\": \"Robert De Niro\"}]
Helpful Answer: Al Pacino and Robert De Niro played in Heat.

If the information is empty, say that you don't know the answer.
Information:
{context}

Question: {question}
Helpful Answer:";

/// Prompt asking the model for a Cypher statement.
pub fn cypher_generation_prompt(schema: &str, question: &str) -> String {
    CYPHER_GENERATION_TEMPLATE
        .replace("{schema}", schema)
        .replace("{question}", question)
}

/// Prompt asking the model to phrase query rows as an answer.
pub fn qa_prompt(context: &[JsonRow], question: &str) -> String {
    let context = serde_json::to_string(context).unwrap_or_else(|_| "[]".to_string());
    CYPHER_QA_TEMPLATE
        .replace("{context}", &context)
        .replace("{question}", question)
}
