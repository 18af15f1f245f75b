//! Persisted vector index: chunk payloads plus their embeddings.
//!
//! The index is built wholesale by the ingest job, serialized as JSON on
//! disk, and read-only at query time. Search is a linear cosine scan — the
//! corpus is small enough that nothing smarter is warranted.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::kb::embeddings::{cosine_similarity, TextEmbedder};

/// Embedding batch size while building the index.
const BUILD_BATCH_SIZE: usize = 32;

/// A bounded slice of source document text, with its provenance.
/// Produced once at ingestion time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub text: String,
    /// Source PDF file name.
    pub source: String,
    /// 1-based page number within the source.
    pub page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    chunk: DocumentChunk,
    embedding: Vec<f32>,
}

/// A retrieval match with its similarity score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub chunk: DocumentChunk,
    pub score: f32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Embeds the chunks in batches and builds a fresh index.
    pub fn build(chunks: Vec<DocumentChunk>, embedder: &dyn TextEmbedder) -> Result<Self> {
        let mut entries = Vec::with_capacity(chunks.len());

        for batch in chunks.chunks(BUILD_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
            let embeddings = embedder.embed_batch(&texts)?;
            for (chunk, embedding) in batch.iter().zip(embeddings) {
                entries.push(IndexEntry {
                    chunk: chunk.clone(),
                    embedding,
                });
            }
        }

        Ok(Self { entries })
    }

    /// Writes the index to `path` as JSON, replacing any prior index there.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create index directory {}", parent.display()))?;
        }
        let data = serde_json::to_vec(self).context("Failed to serialize index")?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write index to {}", path.display()))?;
        Ok(())
    }

    /// Loads a previously persisted index.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!(
                "Vector index not found at {} — run the `ingest` binary first",
                path.display()
            );
        }
        let data = fs::read(path)
            .with_context(|| format!("Failed to read index from {}", path.display()))?;
        serde_json::from_slice(&data).context("Failed to deserialize index")
    }

    /// Returns the top-k entries by cosine similarity, best first.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
