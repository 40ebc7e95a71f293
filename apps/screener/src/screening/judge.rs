//! Fit Judge: an independent YES/NO verdict with a short reason.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm_client::{LlmError, PacedModel};
use crate::screening::prompts::{render, JUDGE_PROMPT_TEMPLATE};

/// Reasons longer than this are cut, counted in characters.
pub const MAX_REASON_CHARS: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub verdict: bool,
    pub reason: String,
}

pub struct FitJudge {
    model: Arc<PacedModel>,
}

impl FitJudge {
    pub fn new(model: Arc<PacedModel>) -> Self {
        Self { model }
    }

    pub async fn judge(&self, jd_text: &str, resume_text: &str) -> Result<Judgement, LlmError> {
        let prompt = render(JUDGE_PROMPT_TEMPLATE, jd_text, resume_text);
        let reply = self.model.complete(&prompt, "judging").await?;
        Ok(parse_judgement(&reply))
    }
}

/// Verdict is true when the reply starts with YES (case-insensitive, after
/// trimming). Reason is whatever follows the first `-`, or the whole reply.
pub fn parse_judgement(reply: &str) -> Judgement {
    let trimmed = reply.trim();
    let verdict = trimmed.to_uppercase().starts_with("YES");
    let reason = match trimmed.split_once('-') {
        Some((_, rest)) => rest.trim(),
        None => trimmed,
    };
    Judgement {
        verdict,
        reason: reason.chars().take(MAX_REASON_CHARS).collect(),
    }
}
