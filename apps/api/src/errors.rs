use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of any stage of the analysis pipeline.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DataAccess(#[from] sqlx::Error),

    #[error("Model invocation failed: {0}")]
    ModelInvocation(#[from] LlmError),

    /// The model answered, but nothing parseable could be recovered from it.
    #[error("Model returned invalid JSON: {reason}\n{raw}")]
    MalformedModelOutput { reason: String, raw: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        AppError::MalformedModelOutput {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every pipeline failure surfaces the same way; only the logs tell them apart.
        match &self {
            AppError::DataAccess(e) => tracing::error!("Database error: {e}"),
            AppError::ModelInvocation(e) => tracing::error!("LLM error: {e}"),
            AppError::MalformedModelOutput { reason, raw } => {
                tracing::error!("Malformed model output ({reason}): {raw}")
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "erro": self.to_string() }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
