use std::path::PathBuf;

use anyhow::{Context, Result};
use secrecy::SecretString;

use crate::llm_client::DEFAULT_API_URL;
use crate::models::ScorerBackend;

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub scorer_backend: ScorerBackend,
    /// Ambient completion-service key. Never logged.
    pub openai_api_key: Option<SecretString>,
    pub openai_api_url: String,
    pub cors_allowed_origin: String,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            scorer_backend: var("SCORER_BACKEND")
                .unwrap_or_else(|| "rules".to_string())
                .parse::<ScorerBackend>()
                .map_err(anyhow::Error::msg)
                .context("SCORER_BACKEND must be 'rules' or 'llm'")?,
            openai_api_key: var("OPENAI_API_KEY").map(SecretString::from),
            openai_api_url: var("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
        })
    }
}
