//! Categorizer: buckets a 0–100 fit score into a tier.
//!
//! The tier is the one source of truth for everything downstream: its group
//! label in the report, the notification template, and the verdict the judge
//! is expected to agree with.

use serde::{Deserialize, Serialize};

use crate::notify::templates::NotificationTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Report groups, best first.
    pub const GROUP_ORDER: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    /// ≤50 Low, 51–75 Medium, >75 High.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=50 => Tier::Low,
            51..=75 => Tier::Medium,
            _ => Tier::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }

    /// Name of the report group this tier is shown under.
    pub fn group_label(self) -> &'static str {
        match self {
            Tier::High => "Top",
            Tier::Medium => "Average",
            Tier::Low => "Regret",
        }
    }

    pub fn notification(self) -> NotificationTemplate {
        match self {
            Tier::High => NotificationTemplate::Shortlisted,
            Tier::Medium => NotificationTemplate::UnderReview,
            Tier::Low => NotificationTemplate::NotSelected,
        }
    }

    /// What the judge should answer for a candidate in this tier.
    pub fn expected_verdict(self) -> bool {
        matches!(self, Tier::High | Tier::Medium)
    }
}
