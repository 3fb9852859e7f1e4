mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::aggregator::{DataAggregator, PgAggregator};
use crate::analysis::pipeline::AnalysisPipeline;
use crate::analysis::recoverer::{BraceSliceRecoverer, ResultRecoverer, ScoreRangeGuard};
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::build_invoker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vagas-match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let aggregator: Arc<dyn DataAggregator> =
        Arc::new(PgAggregator::new(create_pool(&config.database_url)?));

    // Initialize model backend
    let invoker = build_invoker(&config)?;
    info!(
        "LLM backend initialized (provider: {}, model: {}, timeout: {:?})",
        invoker.provider(),
        invoker.model(),
        config.model_timeout
    );

    let recoverer: Arc<dyn ResultRecoverer> = if config.strict_scores {
        info!("Strict score validation enabled");
        Arc::new(ScoreRangeGuard::new(BraceSliceRecoverer))
    } else {
        Arc::new(BraceSliceRecoverer)
    };

    let pipeline = AnalysisPipeline::new(
        aggregator.clone(),
        invoker,
        recoverer,
        config.model_timeout,
    );

    // Build app state
    let state = AppState {
        aggregator,
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
