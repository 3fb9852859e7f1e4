use std::sync::Arc;

use crate::analysis::aggregator::DataAggregator;
use crate::analysis::pipeline::AnalysisPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record source; also answers the connectivity probe.
    pub aggregator: Arc<dyn DataAggregator>,
    pub pipeline: Arc<AnalysisPipeline>,
}
