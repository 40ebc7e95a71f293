//! Report views over the recorded candidates of one run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::candidate::CandidateRecord;
use crate::notify::NotificationStatus;
use crate::screening::tier::Tier;

/// One row of the full candidate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub name: String,
    pub email: String,
    pub skills: String,
    pub score: u32,
    pub category: &'static str,
    pub tier: Tier,
    pub judge: &'static str,
    pub notification: NotificationStatus,
}

/// One row of a per-tier table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRow {
    pub name: String,
    pub email: String,
    pub skills: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierGroup {
    pub category: &'static str,
    pub tier: Tier,
    pub candidates: Vec<TierRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Justification {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Sorted by score, highest first.
    pub candidates: Vec<CandidateRow>,
    /// Top, Average, Regret; empty groups left out.
    pub tiers: Vec<TierGroup>,
    /// Share of candidates whose judge verdict matches their tier. `None` when
    /// nothing was recorded.
    pub accuracy: Option<f64>,
    /// Judge reasons for the Top group.
    pub top_justifications: Vec<Justification>,
    /// Files that produced no text.
    pub skipped: Vec<String>,
    /// Operator-facing warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ScreeningReport {
    pub fn build(
        mut records: Vec<CandidateRecord>,
        skipped: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        // stable: equal scores keep upload order
        records.sort_by(|a, b| b.score.cmp(&a.score));

        let candidates = records
            .iter()
            .map(|r| CandidateRow {
                name: r.name.clone(),
                email: r.email_display().to_string(),
                skills: r.skills_summary(),
                score: r.score,
                category: r.tier.group_label(),
                tier: r.tier,
                judge: r.judge_label(),
                notification: r.notification.clone(),
            })
            .collect();

        let tiers = Tier::GROUP_ORDER
            .iter()
            .filter_map(|tier| {
                let rows: Vec<TierRow> = records
                    .iter()
                    .filter(|r| r.tier == *tier)
                    .map(|r| TierRow {
                        name: r.name.clone(),
                        email: r.email_display().to_string(),
                        skills: r.skills_summary(),
                        score: r.score,
                    })
                    .collect();
                (!rows.is_empty()).then(|| TierGroup {
                    category: tier.group_label(),
                    tier: *tier,
                    candidates: rows,
                })
            })
            .collect();

        let top_justifications = records
            .iter()
            .filter(|r| r.tier == Tier::High)
            .map(|r| Justification {
                name: r.name.clone(),
                reason: r.judge_reason.clone(),
            })
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            candidates,
            tiers,
            accuracy: judge_accuracy(&records),
            top_justifications,
            skipped,
            warnings,
        }
    }
}

pub fn judge_accuracy(records: &[CandidateRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let agreeing = records.iter().filter(|r| r.judge_agrees_with_tier()).count();
    Some(agreeing as f64 / records.len() as f64)
}
