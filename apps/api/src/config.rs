use std::time::Duration;

use thiserror::Error;

use crate::llm_client::LlmProvider;

const DEFAULT_PORT: u16 = 5062;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable '{0}' is not set")]
    Missing(&'static str),

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration loaded once at startup from environment variables.
/// Passed by reference into everything that needs it; nothing reads the
/// environment after `main` builds this.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm_provider: LlmProvider,
    /// Key for whichever provider `llm_provider` selects.
    pub llm_api_key: String,
    pub llm_model: Option<String>,
    pub llm_base_url: Option<String>,
    pub llm_temperature: f32,
    pub model_timeout: Duration,
    pub strict_scores: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse::<LlmProvider>().map_err(|reason| ConfigError::Invalid {
                key: "LLM_PROVIDER",
                reason,
            })?,
            None => LlmProvider::Gemini,
        };

        let key_var = match llm_provider {
            LlmProvider::Gemini => "GOOGLE_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        };

        Ok(Config {
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            llm_provider,
            llm_api_key: get(key_var).ok_or(ConfigError::Missing(key_var))?,
            llm_model: get("LLM_MODEL"),
            llm_base_url: get("LLM_BASE_URL"),
            llm_temperature: parse_or("LLM_TEMPERATURE", get("LLM_TEMPERATURE"), 0.0)?,
            model_timeout: Duration::from_secs(parse_or(
                "MODEL_TIMEOUT_SECS",
                get("MODEL_TIMEOUT_SECS"),
                DEFAULT_MODEL_TIMEOUT_SECS,
            )?),
            strict_scores: parse_or("STRICT_SCORES", get("STRICT_SCORES"), false)?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
