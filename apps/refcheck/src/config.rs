use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::extraction::ai::DEFAULT_MAX_PROMPT_CHARS;
use crate::pipeline::PipelineSettings;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Only required by commands that call the model.
    pub anthropic_api_key: Option<String>,
    /// Enables the PostgreSQL question lookup when set.
    pub database_url: Option<String>,
    pub vectorstore_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub lookup_timeout_secs: u64,
    pub max_prompt_chars: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            database_url: optional_env("DATABASE_URL"),
            vectorstore_dir: PathBuf::from(
                optional_env("VECTORSTORE_DIR").unwrap_or_else(|| "./vectorstore".to_string()),
            ),
            fetch_timeout_secs: parse_or("FETCH_TIMEOUT_SECS", optional_env("FETCH_TIMEOUT_SECS"), 30)?,
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", optional_env("LLM_TIMEOUT_SECS"), 90)?,
            lookup_timeout_secs: parse_or(
                "LOOKUP_TIMEOUT_SECS",
                optional_env("LOOKUP_TIMEOUT_SECS"),
                10,
            )?,
            max_prompt_chars: parse_or(
                "MAX_PROMPT_CHARS",
                optional_env("MAX_PROMPT_CHARS"),
                DEFAULT_MAX_PROMPT_CHARS,
            )?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn require_anthropic_api_key(&self) -> Result<&str> {
        self.anthropic_api_key
            .as_deref()
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            llm_timeout: Duration::from_secs(self.llm_timeout_secs),
            lookup_timeout: Duration::from_secs(self.lookup_timeout_secs),
            max_prompt_chars: self.max_prompt_chars,
            vectorstore_root: self.vectorstore_dir.clone(),
        }
    }
}

/// Set and non-blank, or `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        assert_eq!(parse_or::<u64>("LLM_TIMEOUT_SECS", None, 90).unwrap(), 90);
    }

    #[test]
    fn test_parse_or_reads_value() {
        assert_eq!(parse_or::<u64>("LLM_TIMEOUT_SECS", Some(" 45 ".into()), 90).unwrap(), 45);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let err = parse_or::<usize>("MAX_PROMPT_CHARS", Some("lots".into()), 3000).unwrap_err();
        assert!(err.to_string().contains("MAX_PROMPT_CHARS"));
    }

    #[test]
    fn test_pipeline_settings_conversion() {
        let config = Config {
            anthropic_api_key: None,
            database_url: None,
            vectorstore_dir: PathBuf::from("/tmp/vs"),
            fetch_timeout_secs: 5,
            llm_timeout_secs: 60,
            lookup_timeout_secs: 2,
            max_prompt_chars: 1500,
            rust_log: "debug".to_string(),
        };
        let settings = config.pipeline_settings();
        assert_eq!(settings.fetch_timeout, Duration::from_secs(5));
        assert_eq!(settings.max_prompt_chars, 1500);
        assert_eq!(settings.vectorstore_root, PathBuf::from("/tmp/vs"));
        assert!(config.require_anthropic_api_key().is_err());
    }
}
