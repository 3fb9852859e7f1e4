use serde::{Deserialize, Serialize};

/// Compatibility of one candidate with one job, as scored by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "vaga_id")]
    pub job_id: i64,
    #[serde(rename = "vaga_nome")]
    pub job_title: String,
    /// Nominally 0–100. Not range-checked unless strict scoring is on.
    #[serde(rename = "compatibilidade")]
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// The model's pick; not recomputed from `all_matches`.
    #[serde(rename = "melhor_vaga")]
    pub best_match: MatchScore,
    /// In the order the model returned them.
    #[serde(rename = "todas_as_vagas")]
    pub all_matches: Vec<MatchScore>,
}

/// Body of a successful `GET /analise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "candidatos")]
    pub candidates: Vec<CandidateResult>,
}

impl AnalysisResult {
    pub fn scores(&self) -> impl Iterator<Item = &MatchScore> {
        self.candidates
            .iter()
            .flat_map(|c| std::iter::once(&c.best_match).chain(c.all_matches.iter()))
    }
}
