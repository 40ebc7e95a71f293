use serde::{Deserialize, Serialize};

use crate::notify::NotificationStatus;
use crate::screening::tier::Tier;

/// Everything learned about one resume. Built once at the end of its
/// pipeline pass and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub file_name: String,
    pub name: String,
    pub email: Option<String>,
    /// Sorted, deduplicated.
    pub skills: Vec<String>,
    /// 0..=100
    pub score: u32,
    pub tier: Tier,
    pub judge_verdict: bool,
    /// At most 250 characters.
    pub judge_reason: String,
    pub notification: NotificationStatus,
}

impl CandidateRecord {
    /// Email as shown to the operator: the address, or "None".
    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or("None")
    }

    /// The first five skills, comma separated.
    pub fn skills_summary(&self) -> String {
        self.skills
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn judge_label(&self) -> &'static str {
        if self.judge_verdict {
            "YES"
        } else {
            "NO"
        }
    }

    /// Whether the judge agrees with what the tier implies.
    pub fn judge_agrees_with_tier(&self) -> bool {
        self.judge_verdict == self.tier.expected_verdict()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_record(name: &str, score: u32, verdict: bool) -> CandidateRecord {
        CandidateRecord {
            file_name: format!("{name}.pdf"),
            name: name.to_string(),
            email: None,
            skills: vec![],
            score,
            tier: Tier::from_score(score),
            judge_verdict: verdict,
            judge_reason: String::new(),
            notification: NotificationStatus::Skipped,
        }
    }

    #[test]
    fn test_skills_summary_keeps_first_five() {
        let mut record = make_record("a", 10, false);
        record.skills = ["aws", "c++", "docker", "git", "linux", "python", "sql"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(record.skills_summary(), "aws, c++, docker, git, linux");
    }

    #[test]
    fn test_email_display_defaults_to_none() {
        let record = make_record("a", 10, false);
        assert_eq!(record.email_display(), "None");
    }

    #[test]
    fn test_judge_agreement() {
        assert!(make_record("top", 90, true).judge_agrees_with_tier());
        assert!(make_record("avg", 60, true).judge_agrees_with_tier());
        assert!(make_record("low", 20, false).judge_agrees_with_tier());
        assert!(!make_record("low", 20, true).judge_agrees_with_tier());
        assert!(!make_record("top", 80, false).judge_agrees_with_tier());
    }
}
