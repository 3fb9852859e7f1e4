use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Returns a static status object naming the model backend in use.
pub async fn home_handler(State(state): State<AppState>) -> Json<Value> {
    let invoker = state.pipeline.invoker();
    Json(json!({
        "status": format!(
            "API running with {} ({}) + PostgreSQL",
            invoker.provider(),
            invoker.model()
        ),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
