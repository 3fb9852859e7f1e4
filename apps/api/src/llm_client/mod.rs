//! LLM Client — the single point of entry for generative-model calls.
//!
//! No other module talks to a model provider directly. Each backend implements
//! [`ModelInvoker`]; which one runs is decided once at startup from `Config`.
//!
//! Calls are single-shot: no streaming, no retry. The pipeline layers a
//! deadline on top of every call.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty model response")]
    EmptyContent,

    #[error("model did not answer within {0:?}")]
    Timeout(Duration),
}

/// Which hosted backend serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(format!("unknown provider '{other}' (expected gemini or openai)")),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => f.write_str("gemini"),
            LlmProvider::OpenAi => f.write_str("openai"),
        }
    }
}

/// Submit one prompt, receive one completion text.
///
/// Implementations return the text trimmed of surrounding whitespace and
/// report a missing or blank text as [`LlmError::EmptyContent`].
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;

    fn provider(&self) -> LlmProvider;

    fn model(&self) -> &str;
}

/// Builds the backend selected by `config.llm_provider`.
pub fn build_invoker(config: &Config) -> Result<Arc<dyn ModelInvoker>, LlmError> {
    let http = http_client(config.model_timeout)?;

    let invoker: Arc<dyn ModelInvoker> = match config.llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            http,
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.llm_base_url.clone(),
            config.llm_temperature,
        )),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            http,
            config.llm_api_key.clone(),
            config.llm_model.clone(),
            config.llm_base_url.clone(),
            config.llm_temperature,
        )),
    };

    Ok(invoker)
}

fn http_client(timeout: Duration) -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turns a non-2xx response into `LlmError::Api`, pulling the provider's
/// `error.message` out of the body when it has one.
async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: api_error_message(&body),
    })
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Both providers wrap failures as `{"error": {"message": ...}}`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Trims the completion and rejects blank output.
fn non_empty(text: Option<String>) -> Result<String, LlmError> {
    let text = text.ok_or(LlmError::EmptyContent)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(trimmed.to_string())
}
