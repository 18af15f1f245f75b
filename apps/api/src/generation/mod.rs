// Question generation: retrieval-augmented prompt assembly, the Groq call,
// and structured-output parsing with a numbered-list fallback.
// All LLM calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
