//! In-memory collaborators for exercising the pipeline and routes without a
//! database or a model provider.

use std::future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::analysis::aggregator::DataAggregator;
use crate::errors::AppError;
use crate::llm_client::{LlmError, LlmProvider, ModelInvoker};
use crate::models::records::{Candidate, Job};

pub const END_TO_END_RESPONSE: &str = r#"{"candidatos":[{"id":1,"nome":"A","melhor_vaga":{"vaga_id":10,"vaga_nome":"T","compatibilidade":80},"todas_as_vagas":[{"vaga_id":10,"vaga_nome":"T","compatibilidade":80}]}]}"#;

pub fn sample_candidate() -> Candidate {
    Candidate {
        id: 1,
        name: "A".into(),
        skills: String::new(),
    }
}

pub fn sample_job() -> Job {
    Job {
        id: 10,
        title: "T".into(),
        description: "d".into(),
        requirements: Some("r".into()),
    }
}

pub struct StaticAggregator {
    candidates: Vec<Candidate>,
    jobs: Vec<Job>,
}

impl StaticAggregator {
    pub fn new(candidates: Vec<Candidate>, jobs: Vec<Job>) -> Self {
        Self { candidates, jobs }
    }
}

#[async_trait]
impl DataAggregator for StaticAggregator {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, AppError> {
        Ok(self.candidates.clone())
    }

    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.jobs.clone())
    }

    async fn probe(&self) -> Result<String, AppError> {
        Ok("DATABASE OK".to_string())
    }
}

/// Every query fails as if the pool could not hand out a connection.
pub struct FailingAggregator;

#[async_trait]
impl DataAggregator for FailingAggregator {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn probe(&self) -> Result<String, AppError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

type ErrorFactory = Box<dyn Fn() -> LlmError + Send + Sync>;

/// Answers every prompt with the same text (or error) and records what it saw.
pub struct StaticInvoker {
    reply: Result<String, ErrorFactory>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StaticInvoker {
    pub fn ok(text: impl Into<String>) -> Self {
        Self::with_reply(Ok(text.into()))
    }

    pub fn err(make: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with_reply(Err(Box::new(make)))
    }

    fn with_reply(reply: Result<String, ErrorFactory>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for StaticInvoker {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make) => Err(make()),
        }
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    fn model(&self) -> &str {
        "static-test-model"
    }
}

/// Never answers.
pub struct HangingInvoker;

#[async_trait]
impl ModelInvoker for HangingInvoker {
    async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
        future::pending().await
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAi
    }

    fn model(&self) -> &str {
        "hanging-test-model"
    }
}
