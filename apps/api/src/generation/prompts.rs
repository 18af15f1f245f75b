// LLM prompt template for the Generation module.

/// Question generation prompt. Replace `{n}`, `{context}`, and `{skills}`
/// before sending.
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"You are an interview preparation assistant.

Using ONLY the context below, generate {n} technical interview questions.
For each question, also provide a short, correct answer.

Context:
"""{context}"""

Skills to target: {skills}

Rules:
- Output a valid JSON array.
- Each element must contain:
  {
    "question": "the interview question",
    "answer": "the correct answer"
  }
- Keep answers short (1-3 sentences), technically precise, and relevant to the context.
- No markdown or explanations outside the JSON.
"#;

/// Fills the question prompt template.
pub fn build_question_prompt(context: &str, skills: &[String], n: usize) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{n}", &n.to_string())
        .replace("{context}", context)
        .replace("{skills}", &skills.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_question_prompt_fills_placeholders() {
        let prompt = build_question_prompt("some context", &["rust".into(), "sql".into()], 5);
        assert!(prompt.contains("generate 5 technical interview questions"));
        assert!(prompt.contains("some context"));
        assert!(prompt.contains("Skills to target: rust, sql"));
        assert!(!prompt.contains("{n}"));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{skills}"));
    }
}
