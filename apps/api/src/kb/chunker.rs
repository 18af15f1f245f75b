//! Overlapping text chunking for retrieval.

/// Configuration for text chunking.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Target characters per chunk.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks, to preserve context
    /// across chunk boundaries.
    pub chunk_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 900,
            chunk_overlap: 150,
        }
    }
}

/// Splits text into overlapping chunks of roughly `chunk_size` characters,
/// snapping to a sentence boundary when one falls near the cut point.
/// Whitespace-only input yields no chunks.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let text_len = chars.len();
    let mut chunks = Vec::new();

    if text_len == 0 {
        return chunks;
    }

    let mut start = 0;
    while start < text_len {
        let end = (start + config.chunk_size).min(text_len);

        // Prefer a sentence boundary within the last 100 chars of the window.
        let adjusted_end = if end < text_len {
            let search_start = end.saturating_sub(100).max(start);
            let tail: String = chars[search_start..end].iter().collect();
            match tail.rfind(['.', '!', '?']) {
                Some(pos) => {
                    let candidate = search_start + tail[..pos].chars().count() + 1;
                    if candidate > start {
                        candidate
                    } else {
                        end
                    }
                }
                None => end,
            }
        } else {
            end
        };

        let final_end = adjusted_end.max(start + 1).min(text_len);
        let piece: String = chars[start..final_end].iter().collect();
        let piece = piece.trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }

        if final_end >= text_len {
            break;
        }

        // Step forward with overlap, guaranteeing progress.
        let next_start = if config.chunk_overlap > 0 && final_end > config.chunk_overlap {
            final_end - config.chunk_overlap
        } else {
            final_end
        };
        start = if next_start <= start {
            start + 1
        } else {
            next_start
        };
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(split_text("", &ChunkConfig::default()).is_empty());
        assert!(split_text("   \n  ", &ChunkConfig::default()).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_text("one small page", &ChunkConfig::default());
        assert_eq!(chunks, vec!["one small page".to_string()]);
    }

    #[test]
    fn test_chunks_overlap() {
        let text = "abcdefghij".repeat(30); // 300 chars, no sentence breaks
        let config = ChunkConfig {
            chunk_size: 100,
            chunk_overlap: 20,
        };
        let chunks = split_text(&text, &config);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev_tail: String = pair[0].chars().rev().take(20).collect::<String>()
                .chars().rev().collect();
            assert!(pair[1].starts_with(&prev_tail));
        }
    }

    #[test]
    fn test_snaps_to_sentence_boundary() {
        let mut text = "Lead sentence. ".to_string();
        text.push_str(&"x".repeat(200));
        let config = ChunkConfig {
            chunk_size: 60,
            chunk_overlap: 0,
        };
        let chunks = split_text(&text, &config);
        assert_eq!(chunks[0], "Lead sentence.");
    }

    #[test]
    fn test_always_terminates() {
        let config = ChunkConfig {
            chunk_size: 5,
            chunk_overlap: 5, // overlap >= size must still make progress
        };
        let chunks = split_text(&"y".repeat(50), &config);
        assert!(!chunks.is_empty());
    }
}
