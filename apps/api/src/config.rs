use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default Groq model used for question generation.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_model: String,
    /// Directory scanned for PDF source documents at ingest time.
    pub kb_dir: PathBuf,
    /// Location of the persisted vector index (rebuilt wholesale by `ingest`).
    pub index_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_env_for_ingest()?;
        config.groq_api_key = require_env("GROQ_API_KEY")?;
        Ok(config)
    }

    /// Variant for the offline ingest job, which never calls the LLM and so
    /// does not need an API key.
    pub fn from_env_for_ingest() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            kb_dir: std::env::var("KB_DIR")
                .unwrap_or_else(|_| "data/raw".to_string())
                .into(),
            index_path: std::env::var("INDEX_PATH")
                .unwrap_or_else(|_| "data/indexes/kb_index.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
