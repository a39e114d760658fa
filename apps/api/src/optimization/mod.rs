// Resume optimization: hosted model path plus a local keyword-based fallback.
// All hosted calls go through llm_client.

pub mod handlers;
pub mod keywords;
pub mod optimizer;
pub mod prompts;
pub mod synthesizer;
