//! Entry point for the graphqa question form server.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use graphqa_chain::{ChainOptions, CypherQaChain, GroqChat, ModelConfig};
use graphqa_core::Settings;
use graphqa_graph::{GraphClient, GraphConfig};
use graphqa_web::{router, AppState};

#[derive(Parser)]
#[command(name = "graphqa-web")]
#[command(about = "Ask questions of a Neo4j graph in plain language")]
struct Cli {
    /// Config file prefix (default: graphqa).
    #[arg(short, long, default_value = "graphqa")]
    config: String,

    /// Listen address, overriding the configured one.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    // A local .env fills in variables not already set in the environment.
    dotenvy::dotenv().ok();
    let settings = Settings::load(&cli.config)?;

    // Connect to Neo4j and read the schema once.
    let graph = GraphClient::connect(&graph_config(&settings)).await?;
    let schema = graph.refresh_schema().await?.to_string();

    let model = GroqChat::new(model_config(&settings));
    tracing::info!(model = %settings.model, api_base = %settings.api_base, "Model client ready");

    let chain = CypherQaChain::new(
        Arc::new(graph),
        Arc::new(model),
        schema.clone(),
        chain_options(&settings),
    );
    let state = AppState::new(schema, Arc::new(chain));

    let addr = cli.listen.unwrap_or(settings.listen);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Serving question form");
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn graph_config(settings: &Settings) -> GraphConfig {
    GraphConfig::new(
        &settings.neo4j_uri,
        &settings.neo4j_username,
        &settings.neo4j_password,
    )
}

fn model_config(settings: &Settings) -> ModelConfig {
    ModelConfig::new(&settings.groq_api_key, &settings.model, &settings.api_base)
}

fn chain_options(settings: &Settings) -> ChainOptions {
    ChainOptions {
        top_k: settings.top_k,
        allow_writes: settings.allow_writes,
        return_intermediate_steps: settings.return_intermediate_steps,
    }
}
