//! Offline ingestion job: rebuilds the vector index from the PDF corpus.
//! Not expected to run concurrently with the serving binary.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::config::Config;
use api::kb::chunker::ChunkConfig;
use api::kb::embeddings::EmbeddingModel;
use api::kb::ingest::ingest_corpus;

fn main() -> Result<()> {
    let config = Config::from_env_for_ingest()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let embedder =
        EmbeddingModel::load().context("Failed to load the sentence-embedding model")?;

    let summary = ingest_corpus(
        &config.kb_dir,
        &config.index_path,
        &ChunkConfig::default(),
        &embedder,
    )?;

    info!(
        "Ingestion complete: {} files, {} pages, {} chunks",
        summary.files, summary.pages, summary.chunks
    );

    Ok(())
}
