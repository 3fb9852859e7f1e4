//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DatabaseProbeResponse {
    pub database: String,
}

/// GET /analise
///
/// Runs the full pipeline. Any failure becomes a 500 with `{"erro": ...}`.
pub async fn handle_analise(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.pipeline.run().await?;
    Ok(Json(result))
}

/// GET /test-db
pub async fn handle_test_db(
    State(state): State<AppState>,
) -> Result<Json<DatabaseProbeResponse>, AppError> {
    let database = state.aggregator.probe().await?;
    Ok(Json(DatabaseProbeResponse { database }))
}
