// Resume screening: detail extraction, model scoring and judging, tiers,
// the per-run pipeline and its report.
// All model calls go through llm_client, no direct Groq calls here.

pub mod details;
pub mod fit_scoring;
pub mod handlers;
pub mod judge;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod skills;
pub mod tier;
pub mod views;
