use std::sync::Arc;

use crate::config::Config;
use crate::kb::embeddings::TextEmbedder;
use crate::kb::Retriever;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. The embedding model and vector index are loaded once at
/// startup and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub embedder: Arc<dyn TextEmbedder>,
    pub retriever: Arc<Retriever>,
    pub config: Config,
}
