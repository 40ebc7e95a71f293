//! Fit Scoring: asks the model for a 0–100 compatibility score.
//!
//! The model contract is purely textual: whatever it says, the first run of
//! one to three digits is taken as the score.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::llm_client::{LlmError, PacedModel};
use crate::screening::prompts::{render, SCORE_PROMPT_TEMPLATE};

pub const MAX_SCORE: u32 = 100;

static SCORE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}").expect("score pattern should compile"));

pub struct FitScorer {
    model: Arc<PacedModel>,
}

impl FitScorer {
    pub fn new(model: Arc<PacedModel>) -> Self {
        Self { model }
    }

    /// Scores one resume. Fails only when the model fails twice in a row.
    pub async fn score(&self, jd_text: &str, resume_text: &str) -> Result<u32, LlmError> {
        let prompt = render(SCORE_PROMPT_TEMPLATE, jd_text, resume_text);
        let reply = self.model.complete(&prompt, "scoring").await?;
        let score = parse_score(&reply);
        debug!("Model replied {reply:?}, parsed score {score}");
        Ok(score)
    }
}

/// First 1–3 digit run, clamped to 100; 0 when the reply has no digits.
pub fn parse_score(reply: &str) -> u32 {
    SCORE_DIGITS
        .find(reply)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|n| n.min(MAX_SCORE))
        .unwrap_or(0)
}
