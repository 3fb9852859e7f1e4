// Prompt Compiler for compatibility analysis.
// The schema below is the contract with the model: `recoverer` parses exactly
// these field names, so any edit here must keep them in sync with
// `models::analysis`.

use anyhow::Context;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::records::{Candidate, Job};

/// Fixed instruction block that opens every analysis prompt.
pub const ANALYSIS_INSTRUCTION: &str = r#"You are a technical recruiter. Compare every candidate below against every job below
and score how well each candidate fits each job.

Return a JSON object with this EXACT schema:
{
  "candidatos": [
    {
      "id": <candidate id>,
      "nome": "<candidate nome>",
      "melhor_vaga": {
        "vaga_id": <job id>,
        "vaga_nome": "<job titulo>",
        "compatibilidade": <integer 0-100>
      },
      "todas_as_vagas": [
        {
          "vaga_id": <job id>,
          "vaga_nome": "<job titulo>",
          "compatibilidade": <integer 0-100>
        }
      ]
    }
  ]
}

Scoring:
- "compatibilidade" is a whole number from 0 (no fit) to 100 (perfect fit).
- "todas_as_vagas" has exactly one entry per job.
- "melhor_vaga" is the entry of "todas_as_vagas" with the highest "compatibilidade".
- "candidatos" has exactly one entry per candidate, using the ids given below."#;

/// Builds the single prompt sent to the model for one analysis run.
///
/// Pure and deterministic: the same candidates and jobs, in the same order,
/// always produce byte-identical output. Records are embedded as compact JSON
/// with their field names, and nothing is truncated.
pub fn compile_prompt(candidates: &[Candidate], jobs: &[Job]) -> Result<String, AppError> {
    let candidates_json =
        serde_json::to_string(candidates).context("Failed to serialize candidates")?;
    let jobs_json = serde_json::to_string(jobs).context("Failed to serialize jobs")?;

    let mut prompt = String::with_capacity(
        ANALYSIS_INSTRUCTION.len()
            + JSON_ONLY_INSTRUCTION.len()
            + candidates_json.len()
            + jobs_json.len()
            + 64,
    );
    prompt.push_str(ANALYSIS_INSTRUCTION);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt.push_str("\n\nCANDIDATOS:\n");
    prompt.push_str(&candidates_json);
    prompt.push_str("\n\nVAGAS:\n");
    prompt.push_str(&jobs_json);
    prompt.push('\n');

    Ok(prompt)
}
