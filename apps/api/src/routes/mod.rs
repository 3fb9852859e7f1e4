pub mod health;

use axum::{routing::get, Router};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/test-db", get(handlers::handle_test_db))
        .route("/analise", get(handlers::handle_analise))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::aggregator::DataAggregator;
    use crate::analysis::pipeline::AnalysisPipeline;
    use crate::analysis::recoverer::BraceSliceRecoverer;
    use crate::analysis::test_support::{
        sample_candidate, sample_job, FailingAggregator, StaticAggregator, StaticInvoker,
        END_TO_END_RESPONSE,
    };

    fn app(aggregator: Arc<dyn DataAggregator>, model_reply: &str) -> Router {
        let pipeline = AnalysisPipeline::new(
            aggregator.clone(),
            Arc::new(StaticInvoker::ok(model_reply)),
            Arc::new(BraceSliceRecoverer),
            Duration::from_secs(30),
        );
        build_router(AppState {
            aggregator,
            pipeline: Arc::new(pipeline),
        })
    }

    fn healthy_store() -> Arc<dyn DataAggregator> {
        Arc::new(StaticAggregator::new(
            vec![sample_candidate()],
            vec![sample_job()],
        ))
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_home_reports_status() {
        let (status, body) = send_get(app(healthy_store(), END_TO_END_RESPONSE), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["status"]
            .as_str()
            .unwrap()
            .contains("static-test-model"));
    }

    #[tokio::test]
    async fn test_analise_returns_model_result() {
        let (status, body) =
            send_get(app(healthy_store(), END_TO_END_RESPONSE), "/analise").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::from_str::<Value>(END_TO_END_RESPONSE).unwrap()
        );
    }

    #[tokio::test]
    async fn test_analise_failure_is_500_with_erro() {
        let (status, body) =
            send_get(app(healthy_store(), "I cannot comply."), "/analise").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["erro"].as_str().unwrap().contains("I cannot comply."));
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_database_outage_is_500_with_erro() {
        let outage = app(Arc::new(FailingAggregator), END_TO_END_RESPONSE);
        let (status, body) = send_get(outage, "/analise").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["erro"].as_str().unwrap().starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_db_probe() {
        let (status, body) =
            send_get(app(healthy_store(), END_TO_END_RESPONSE), "/test-db").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "database": "DATABASE OK" }));

        let outage = app(Arc::new(FailingAggregator), END_TO_END_RESPONSE);
        let (status, body) = send_get(outage, "/test-db").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("erro").is_some());
    }
}
