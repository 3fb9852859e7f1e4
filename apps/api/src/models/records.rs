use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A candidate as handed to the model. Field names on the wire are the ones
/// the prompt and the model both use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    /// Skill names sorted and joined with `", "`; empty when there are none.
    #[serde(rename = "competencias")]
    pub skills: String,
}

/// An open position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "requisitos")]
    pub requirements: Option<String>,
}

/// One row of the users ⟕ skills join: a candidate paired with at most one skill.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateSkillRow {
    pub id: i64,
    pub name: String,
    pub skill: Option<String>,
}
