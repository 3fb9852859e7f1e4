//! Result Recoverer — turns raw model text into an `AnalysisResult`.
//!
//! Models often wrap otherwise-valid JSON in prose ("Here is the result: ...")
//! or code fences. `BraceSliceRecoverer` handles that with two attempts:
//!
//! 1. parse the whole trimmed text;
//! 2. parse the slice from the first `{` to the last `}` inclusive.
//!
//! If both fail the raw text is returned inside `MalformedModelOutput`.
//! Beyond what typed deserialization enforces there is no schema check;
//! `ScoreRangeGuard` layers one on when strict scoring is enabled.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;

/// Recovers a structured result from one model response.
///
/// Carried in the pipeline as `Arc<dyn ResultRecoverer>`; wrap an
/// implementation to add validation without touching the pipeline.
pub trait ResultRecoverer: Send + Sync {
    fn recover(&self, raw: &str) -> Result<AnalysisResult, AppError>;
}

/// Direct parse, then first-`{`-to-last-`}` slice.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceSliceRecoverer;

impl ResultRecoverer for BraceSliceRecoverer {
    fn recover(&self, raw: &str) -> Result<AnalysisResult, AppError> {
        let text = raw.trim();

        let direct_err = match serde_json::from_str::<AnalysisResult>(text) {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };
        debug!("Direct parse of model output failed: {direct_err}");

        let Some(slice) = brace_slice(text) else {
            return Err(AppError::malformed("no JSON object found", raw));
        };

        match serde_json::from_str::<AnalysisResult>(slice) {
            Ok(result) => {
                warn!(
                    "Recovered model output by brace slicing ({} of {} bytes kept)",
                    slice.len(),
                    text.len()
                );
                Ok(result)
            }
            Err(e) => Err(AppError::malformed(e.to_string(), raw)),
        }
    }
}

/// Substring from the first `{` to the last `}` inclusive, if they appear in that order.
fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Rejects results whose `compatibilidade` values fall outside 0–100.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreRangeGuard<R> {
    inner: R,
}

impl<R: ResultRecoverer> ScoreRangeGuard<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: ResultRecoverer> ResultRecoverer for ScoreRangeGuard<R> {
    fn recover(&self, raw: &str) -> Result<AnalysisResult, AppError> {
        let result = self.inner.recover(raw)?;

        if let Some(bad) = result.scores().find(|s| !(0..=100).contains(&s.score)) {
            return Err(AppError::malformed(
                format!(
                    "compatibilidade {} for vaga {} is outside 0-100",
                    bad.score, bad.job_id
                ),
                raw,
            ));
        }

        Ok(result)
    }
}
