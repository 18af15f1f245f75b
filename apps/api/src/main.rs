use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::kb::embeddings::EmbeddingModel;
use api::kb::index::VectorIndex;
use api::kb::Retriever;
use api::llm_client::LlmClient;
use api::routes::build_router;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting interview-prep API v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load the embedding model once; reused for retrieval and evaluation.
    let embedder = Arc::new(
        EmbeddingModel::load().context("Failed to load the sentence-embedding model")?,
    );
    info!("Embedding model loaded");

    // Load the persisted vector index. Fails fast if ingestion never ran.
    let index = VectorIndex::load(&config.index_path)?;
    info!(
        "Vector index loaded from {} ({} chunks)",
        config.index_path.display(),
        index.len()
    );
    let retriever = Arc::new(Retriever::new(embedder.clone(), index));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_model.clone());
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        llm,
        embedder,
        retriever,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
