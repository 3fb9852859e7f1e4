// Compatibility analysis: load candidates and jobs, ask the model to score
// every pair, recover its JSON answer.
// All model calls go through llm_client — no direct provider calls here.

pub mod aggregator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod recoverer;

#[cfg(test)]
pub(crate) mod test_support;
