//! Data Aggregator — loads candidates and jobs from PostgreSQL.
//!
//! Read-only. Errors are passed up untouched as `AppError::DataAccess`; nothing
//! here retries or interprets them.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::records::{Candidate, CandidateSkillRow, Job};

/// Separator between skill names in `Candidate::skills`.
pub const SKILL_SEPARATOR: &str = ", ";

const CANDIDATE_SKILLS_QUERY: &str = r#"
    SELECT
        u.usuario_id::BIGINT AS id,
        u.nome AS name,
        c.nome AS skill
    FROM usuarios u
    LEFT JOIN usuario_competencias uc ON uc.usuario_id = u.usuario_id
    LEFT JOIN competencias c ON c.competencia_id = uc.competencia_id
    ORDER BY u.usuario_id, c.nome
"#;

const JOBS_QUERY: &str = r#"
    SELECT
        vaga_id::BIGINT AS id,
        titulo AS title,
        COALESCE(descricao, '') AS description,
        requisitos AS requirements
    FROM vagas
    ORDER BY vaga_id
"#;

const PROBE_QUERY: &str = "SELECT 'DATABASE OK'::TEXT";

/// Source of the records an analysis runs over.
///
/// Carried in `AppState` as `Arc<dyn DataAggregator>`.
#[async_trait]
pub trait DataAggregator: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, AppError>;

    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError>;

    /// Trivial round trip to the store, for connectivity checks.
    async fn probe(&self) -> Result<String, AppError>;
}

pub struct PgAggregator {
    pool: PgPool,
}

impl PgAggregator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataAggregator for PgAggregator {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, AppError> {
        let rows = sqlx::query_as::<_, CandidateSkillRow>(CANDIDATE_SKILLS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} candidate/skill rows", rows.len());

        Ok(fold_candidate_rows(rows))
    }

    async fn fetch_jobs(&self) -> Result<Vec<Job>, AppError> {
        // fetch_all decodes every column into an owned String, so large
        // descriptions are fully read here or the query fails.
        let jobs = sqlx::query_as::<_, Job>(JOBS_QUERY)
            .fetch_all(&self.pool)
            .await?;
        debug!("Fetched {} jobs", jobs.len());

        Ok(jobs)
    }

    async fn probe(&self) -> Result<String, AppError> {
        let answer: String = sqlx::query_scalar(PROBE_QUERY)
            .fetch_one(&self.pool)
            .await?;
        Ok(answer)
    }
}

/// Collapses the candidate ⟕ skill join into one `Candidate` per id.
///
/// Candidates come out in ascending id order. Each candidate's skills are
/// sorted by name and joined with [`SKILL_SEPARATOR`]; rows without a skill
/// contribute nothing, so a candidate with no skills gets `""`.
pub fn fold_candidate_rows(mut rows: Vec<CandidateSkillRow>) -> Vec<Candidate> {
    rows.sort_by_key(|r| r.id);

    let mut candidates = Vec::new();
    let mut current: Option<(i64, String, Vec<String>)> = None;

    for row in rows {
        let same_candidate = matches!(&current, Some((id, _, _)) if *id == row.id);
        if !same_candidate {
            if let Some(done) = current.take() {
                candidates.push(finish_candidate(done));
            }
            current = Some((row.id, row.name, Vec::new()));
        }
        if let (Some((_, _, skills)), Some(skill)) = (current.as_mut(), row.skill) {
            skills.push(skill);
        }
    }
    if let Some(done) = current {
        candidates.push(finish_candidate(done));
    }

    candidates
}

fn finish_candidate((id, name, mut skills): (i64, String, Vec<String>)) -> Candidate {
    skills.sort();
    Candidate {
        id,
        name,
        skills: skills.join(SKILL_SEPARATOR),
    }
}
