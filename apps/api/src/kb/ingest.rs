//! One-shot corpus ingestion: scan a directory of PDFs, split pages into
//! overlapping chunks, embed them, and persist a fresh vector index.
//!
//! Full rebuild, not incremental — the saved index replaces any prior one.
//! Per-file extraction failures are logged and skipped; an empty corpus is
//! fatal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::kb::chunker::{split_text, ChunkConfig};
use crate::kb::embeddings::TextEmbedder;
use crate::kb::index::{DocumentChunk, VectorIndex};

#[derive(Debug)]
pub struct IngestSummary {
    pub files: usize,
    pub pages: usize,
    pub chunks: usize,
}

pub fn ingest_corpus(
    kb_dir: &Path,
    index_path: &Path,
    config: &ChunkConfig,
    embedder: &dyn TextEmbedder,
) -> Result<IngestSummary> {
    info!("Searching for PDFs in {}", kb_dir.display());
    let pdf_paths = find_pdfs(kb_dir)?;
    if pdf_paths.is_empty() {
        bail!("No PDF documents found in {}", kb_dir.display());
    }

    let mut chunks: Vec<DocumentChunk> = Vec::new();
    let mut files_loaded = 0usize;
    let mut pages_loaded = 0usize;

    for path in &pdf_paths {
        let name = file_name(path);
        let pages = match pdf_extract::extract_text_by_pages(path) {
            Ok(pages) => pages,
            Err(e) => {
                warn!("Skipped {name} ({e})");
                continue;
            }
        };
        info!("Loaded {name} ({} pages)", pages.len());
        files_loaded += 1;
        pages_loaded += pages.len();

        for (page_idx, page_text) in pages.iter().enumerate() {
            for text in split_text(page_text, config) {
                chunks.push(DocumentChunk {
                    text,
                    source: name.clone(),
                    page: page_idx + 1,
                });
            }
        }
    }

    if chunks.is_empty() {
        bail!("No text could be extracted from {}", kb_dir.display());
    }
    info!("Chunked into {} pieces", chunks.len());

    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for chunk in &chunks {
        *per_source.entry(chunk.source.as_str()).or_default() += 1;
    }
    for (source, count) in &per_source {
        info!("  - {source}: {count} chunks");
    }

    info!("Building vector index...");
    let total_chunks = chunks.len();
    let index = VectorIndex::build(chunks, embedder)?;
    index.save(index_path)?;
    info!("Index saved to {}", index_path.display());

    Ok(IngestSummary {
        files: files_loaded,
        pages: pages_loaded,
        chunks: total_chunks,
    })
}

/// Flat scan of `dir` for `*.pdf` files (case-insensitive), sorted by name.
fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Corpus directory {} does not exist", dir.display());
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}
