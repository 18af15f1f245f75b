//! Retrieval-augmented question generation.
//!
//! Flow: join skills into a query → retrieve top-k chunks → build prompt →
//! one Groq call → parse structured output, degrading to a numbered-list
//! fallback when the model did not return valid JSON. Malformed model output
//! never surfaces as an error to the caller.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::build_question_prompt;
use crate::kb::index::SearchHit;
use crate::kb::Retriever;
use crate::llm_client::{strip_json_fences, LlmClient};

/// Questions generated per skill set.
pub const DEFAULT_QUESTION_COUNT: usize = 5;
/// Chunks retrieved per query.
const RETRIEVAL_K: usize = 4;
/// Hard cap on assembled context size, to bound the prompt.
const MAX_CONTEXT_CHARS: usize = 6000;
/// Length of the context preview echoed back to the caller.
const CONTEXT_PREVIEW_CHARS: usize = 600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    pub question: String,
    pub answer: String,
}

/// Provenance of one retrieved chunk.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub source: String,
    pub page: usize,
}

/// Generated questions for one skill set, with retrieval provenance.
#[derive(Debug, Clone, Serialize)]
pub struct SkillQuestions {
    pub skills: Vec<String>,
    pub qa_pairs: Vec<QaItem>,
    pub sources: Vec<SourceRef>,
    pub context_preview: String,
}

/// Outcome of parsing the model's output: either the structured JSON array
/// we asked for, or — when parsing fails — the raw text reinterpreted as a
/// list of bare questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QaOutput {
    Structured(Vec<QaItem>),
    RawQuestions(Vec<String>),
}

impl QaOutput {
    /// Collapses both variants into QA items; raw questions get empty answers.
    pub fn into_items(self) -> Vec<QaItem> {
        match self {
            QaOutput::Structured(items) => items,
            QaOutput::RawQuestions(questions) => questions
                .into_iter()
                .map(|question| QaItem {
                    question,
                    answer: String::new(),
                })
                .collect(),
        }
    }
}

/// Parses model output as a JSON array of `{question, answer}` objects
/// (markdown fences tolerated). Any parse or shape failure degrades to the
/// numbered-list fallback. Never errors.
pub fn parse_qa_output(text: &str) -> QaOutput {
    match serde_json::from_str::<Vec<QaItem>>(strip_json_fences(text)) {
        Ok(items) => QaOutput::Structured(items),
        Err(e) => {
            warn!("Model did not return valid JSON ({e}); using fallback parser");
            QaOutput::RawQuestions(normalize_numbered_list(text))
        }
    }
}

/// Interprets free text as a numbered or line-delimited question list.
/// A single physical line is split on inline numbering ("1. ... 2. ...");
/// multiple lines each get their leading numbering stripped.
pub fn normalize_numbered_list(text: &str) -> Vec<String> {
    static INLINE_SPLIT: OnceLock<Regex> = OnceLock::new();
    static LINE_PREFIX: OnceLock<Regex> = OnceLock::new();
    let inline_split =
        INLINE_SPLIT.get_or_init(|| Regex::new(r"\s*\d+[).]?\s+").expect("valid regex"));
    let line_prefix =
        LINE_PREFIX.get_or_init(|| Regex::new(r"^\s*\d+[).\-\s]*").expect("valid regex"));

    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() == 1 {
        return inline_split
            .split(text.trim())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }

    lines
        .iter()
        .map(|l| line_prefix.replace(l, "").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Concatenates retrieved chunks with source/page annotations, truncated to
/// the context budget.
fn build_context(hits: &[SearchHit]) -> String {
    let ctx = hits
        .iter()
        .map(|h| {
            format!(
                "[source: {}, page {}]\n{}",
                h.chunk.source, h.chunk.page, h.chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    truncate_chars(&ctx, MAX_CONTEXT_CHARS)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Whitespace-collapsing preview, cut at a word boundary.
fn shorten(text: &str, width: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }
    let placeholder = " [...]";
    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    for word in collapsed.split(' ') {
        let needed = word.chars().count() + if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + needed > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.push_str(placeholder);
    out
}

/// Generates at most `n` interview questions for a skill set, grounded in
/// the indexed knowledge base.
pub async fn generate_for_skills(
    llm: &LlmClient,
    retriever: &Retriever,
    skills: &[String],
    n: usize,
) -> Result<SkillQuestions, AppError> {
    if skills.is_empty() {
        return Ok(SkillQuestions {
            skills: Vec::new(),
            qa_pairs: Vec::new(),
            sources: Vec::new(),
            context_preview: String::new(),
        });
    }

    let query = skills.join(", ");
    let hits = retriever
        .retrieve(&query, RETRIEVAL_K)
        .map_err(AppError::Internal)?;
    let context = build_context(&hits);
    let prompt = build_question_prompt(&context, skills, n);

    info!("Generating questions for [{query}] via Groq ({})", llm.model());
    let text = llm.complete(&prompt).await?;

    let mut qa_pairs = parse_qa_output(&text).into_items();
    qa_pairs.truncate(n);

    let sources = hits
        .iter()
        .map(|h| SourceRef {
            source: h.chunk.source.clone(),
            page: h.chunk.page,
        })
        .collect();

    Ok(SkillQuestions {
        skills: skills.to_vec(),
        qa_pairs,
        sources,
        context_preview: shorten(&context, CONTEXT_PREVIEW_CHARS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::index::DocumentChunk;

    fn hit(text: &str, source: &str, page: usize) -> SearchHit {
        SearchHit {
            chunk: DocumentChunk {
                text: text.to_string(),
                source: source.to_string(),
                page,
            },
            score: 0.9,
        }
    }

    #[test]
    fn test_parse_valid_json_is_structured() {
        let text = r#"[{"question": "What is Rust?", "answer": "A systems language."}]"#;
        let parsed = parse_qa_output(text);
        assert_eq!(
            parsed,
            QaOutput::Structured(vec![QaItem {
                question: "What is Rust?".into(),
                answer: "A systems language.".into(),
            }])
        );
    }

    #[test]
    fn test_parse_fenced_json_is_structured() {
        let text = "```json\n[{\"question\": \"q\", \"answer\": \"a\"}]\n```";
        assert!(matches!(parse_qa_output(text), QaOutput::Structured(_)));
    }

    #[test]
    fn test_parse_missing_answer_key_falls_back() {
        let text = r#"[{"question": "only a question"}]"#;
        let parsed = parse_qa_output(text);
        assert!(matches!(parsed, QaOutput::RawQuestions(_)));
    }

    #[test]
    fn test_parse_prose_falls_back_with_empty_answers() {
        let items = parse_qa_output("1. Foo\n2. Bar").into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].question, "Foo");
        assert_eq!(items[0].answer, "");
        assert_eq!(items[1].question, "Bar");
    }

    #[test]
    fn test_normalize_numbered_list_multiline() {
        assert_eq!(
            normalize_numbered_list("1. Foo\n2. Bar"),
            vec!["Foo".to_string(), "Bar".to_string()]
        );
    }

    #[test]
    fn test_normalize_numbered_list_single_line() {
        assert_eq!(
            normalize_numbered_list("1. Foo 2) Bar 3. Baz"),
            vec!["Foo".to_string(), "Bar".to_string(), "Baz".to_string()]
        );
    }

    #[test]
    fn test_normalize_numbered_list_plain_lines() {
        assert_eq!(
            normalize_numbered_list("What is Rust?\nWhat is SQL?"),
            vec!["What is Rust?".to_string(), "What is SQL?".to_string()]
        );
    }

    #[test]
    fn test_build_context_annotates_and_truncates() {
        let hits = vec![hit(&"x".repeat(7000), "kb.pdf", 3)];
        let ctx = build_context(&hits);
        assert!(ctx.starts_with("[source: kb.pdf, page 3]\n"));
        assert_eq!(ctx.chars().count(), 6000);
    }

    #[test]
    fn test_shorten_collapses_and_bounds() {
        let text = "word  \n ".repeat(300);
        let preview = shorten(&text, 60);
        assert!(preview.chars().count() <= 60);
        assert!(preview.ends_with(" [...]"));
        assert!(!preview.contains('\n'));

        assert_eq!(shorten("short text", 60), "short text");
    }

    #[test]
    fn test_qa_pairs_truncated_to_requested_count() {
        let many: Vec<String> = (0..8).map(|i| format!("q{i}")).collect();
        let mut items = QaOutput::RawQuestions(many).into_items();
        items.truncate(DEFAULT_QUESTION_COUNT);
        assert_eq!(items.len(), 5);
    }
}
