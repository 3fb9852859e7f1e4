//! Pipeline Orchestrator — one compatibility analysis, start to finish.
//!
//! Flow: fetch_candidates → fetch_jobs → compile_prompt → invoke (with
//! deadline) → recover.
//!
//! Stages run strictly in sequence. The first error aborts the run and is
//! returned as-is; there are no partial results and no retries.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::aggregator::DataAggregator;
use crate::analysis::prompts::compile_prompt;
use crate::analysis::recoverer::ResultRecoverer;
use crate::errors::AppError;
use crate::llm_client::{LlmError, ModelInvoker};
use crate::models::analysis::AnalysisResult;

pub struct AnalysisPipeline {
    aggregator: Arc<dyn DataAggregator>,
    invoker: Arc<dyn ModelInvoker>,
    recoverer: Arc<dyn ResultRecoverer>,
    model_timeout: Duration,
}

impl AnalysisPipeline {
    pub fn new(
        aggregator: Arc<dyn DataAggregator>,
        invoker: Arc<dyn ModelInvoker>,
        recoverer: Arc<dyn ResultRecoverer>,
        model_timeout: Duration,
    ) -> Self {
        Self {
            aggregator,
            invoker,
            recoverer,
            model_timeout,
        }
    }

    pub fn invoker(&self) -> &dyn ModelInvoker {
        self.invoker.as_ref()
    }

    pub async fn run(&self) -> Result<AnalysisResult, AppError> {
        let run_id = Uuid::new_v4();
        self.run_stages()
            .instrument(info_span!("analysis", %run_id))
            .await
    }

    async fn run_stages(&self) -> Result<AnalysisResult, AppError> {
        // Step 1: Load records
        let candidates = self.aggregator.fetch_candidates().await?;
        let jobs = self.aggregator.fetch_jobs().await?;
        info!(
            "Loaded {} candidates and {} jobs",
            candidates.len(),
            jobs.len()
        );

        // Step 2: Compile prompt
        let prompt = compile_prompt(&candidates, &jobs)?;
        debug!("Compiled prompt of {} bytes", prompt.len());

        // Step 3: Single model call, bounded
        info!(
            "Calling {} model {}",
            self.invoker.provider(),
            self.invoker.model()
        );
        let raw = tokio::time::timeout(self.model_timeout, self.invoker.invoke(&prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.model_timeout))??;
        debug!("Model returned {} bytes", raw.len());

        // Step 4: Recover structured result
        let result = self.recoverer.recover(&raw)?;
        info!(
            "Analysis complete: {} candidates scored",
            result.candidates.len()
        );

        Ok(result)
    }
}
