// Knowledge base: PDF ingestion, chunking, local embeddings, and the
// persisted vector index queried at serving time.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod ingest;

use std::sync::Arc;

use anyhow::Result;

use crate::kb::embeddings::TextEmbedder;
use crate::kb::index::{SearchHit, VectorIndex};

/// Read-only retrieval handle over the persisted index.
/// Constructed once at startup and shared across requests.
pub struct Retriever {
    embedder: Arc<dyn TextEmbedder>,
    index: VectorIndex,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn TextEmbedder>, index: VectorIndex) -> Self {
        Self { embedder, index }
    }

    /// Returns the top-k chunks most similar to the query.
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        let query_embedding = self.embedder.embed(query)?;
        Ok(self.index.search(&query_embedding, k))
    }
}
