// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Constraint block appended to any prompt whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\
RULES:
1. Respond with valid JSON only. The first character must be '{' and the last must be '}'.
2. Do NOT include any text outside the JSON object: no prose, no commentary, no apologies.
3. Do NOT use markdown code fences.
4. Use exactly the field names shown in the schema. Do not rename, translate, or add fields.";
