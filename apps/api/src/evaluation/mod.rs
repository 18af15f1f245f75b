//! Answer evaluation: blended lexical/semantic similarity between a
//! candidate answer and a reference answer.
//!
//! Lexical similarity is a Ratcliff/Obershelp longest-matching-block ratio
//! over normalized text; semantic similarity is cosine similarity between
//! sentence embeddings of the raw strings. Final score is
//! 0.6·semantic + 0.4·lexical, rounded to three decimals.

pub mod handlers;

use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::kb::embeddings::{cosine_similarity, TextEmbedder};

const SEMANTIC_WEIGHT: f64 = 0.6;
const LEXICAL_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub question: String,
    pub candidate_answer: String,
    pub reference_answer: String,
    pub score: f64,
}

/// Lowercases, trims, and strips non-alphanumeric characters (whitespace
/// kept) for fair lexical comparison.
pub fn clean_text(text: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));
    re.replace_all(&text.to_lowercase().trim().to_string(), "")
        .into_owned()
}

/// Ratcliff/Obershelp sequence similarity: twice the total matched
/// characters over the combined length. 1.0 when both strings are empty.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total characters covered by matching blocks: the longest common substring
/// plus, recursively, the matches to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j])
        + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common substring of `a` and `b`; earliest occurrence wins ties.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j] = length of common suffix ending at a[i], b[j-1]
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut curr = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let len = prev[j] + 1;
                curr[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = curr;
    }
    best
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Scores a candidate answer against a reference answer in [0, 1].
/// The question is kept for record-keeping only and does not affect the
/// score. Empty answers score 0.0; embedding failures propagate.
pub fn evaluate_answer(
    embedder: &dyn TextEmbedder,
    _question: &str,
    candidate_answer: &str,
    reference_answer: &str,
) -> Result<f64> {
    if candidate_answer.is_empty() || reference_answer.is_empty() {
        return Ok(0.0);
    }

    let lexical = sequence_ratio(&clean_text(candidate_answer), &clean_text(reference_answer));

    let embeddings = embedder.embed_batch(&[candidate_answer, reference_answer])?;
    let semantic = cosine_similarity(&embeddings[0], &embeddings[1]) as f64;

    Ok(round3(SEMANTIC_WEIGHT * semantic + LEXICAL_WEIGHT * lexical))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic embedder: normalized letter-frequency vector.
    struct StubEmbedder;

    impl TextEmbedder for StubEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0f32; 26];
                    for c in t.chars().filter(|c| c.is_ascii_alphabetic()) {
                        v[(c.to_ascii_lowercase() as usize) - ('a' as usize)] += 1.0;
                    }
                    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-9);
                    v.iter().map(|x| x / norm).collect()
                })
                .collect())
        }
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Hello, World!  "), "hello world");
        assert_eq!(clean_text("a-b_c 1.2"), "abc 12");
    }

    #[test]
    fn test_sequence_ratio_identical() {
        assert!((sequence_ratio("abc def", "abc def") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_ratio_disjoint() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_both_empty() {
        assert_eq!(sequence_ratio("", ""), 1.0);
    }

    #[test]
    fn test_sequence_ratio_known_value() {
        // difflib: SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_empty_answers_score_zero() {
        let score = evaluate_answer(&StubEmbedder, "q", "", "reference").unwrap();
        assert_eq!(score, 0.0);
        let score = evaluate_answer(&StubEmbedder, "q", "candidate", "").unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_identical_answers_score_near_one() {
        let answer = "Rust enforces memory safety without a garbage collector";
        let score = evaluate_answer(&StubEmbedder, "q", answer, answer).unwrap();
        assert!((score - 1.0).abs() < 1e-6, "score was {score}");
    }

    #[test]
    fn test_score_rounded_to_three_decimals() {
        let score = evaluate_answer(&StubEmbedder, "q", "abcd", "bcde").unwrap();
        assert_eq!(score, (score * 1000.0).round() / 1000.0);
    }
}
