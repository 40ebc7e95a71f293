//! Detail Extractor: candidate name, email and skills from resume text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::screening::skills::find_skills;

pub const UNKNOWN_NAME: &str = "Unknown";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+")
        .expect("email pattern should compile")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDetails {
    pub name: String,
    pub email: Option<String>,
    pub skills: Vec<String>,
}

pub fn extract_details(text: &str) -> CandidateDetails {
    CandidateDetails {
        name: guess_name(text),
        email: find_email(text),
        skills: find_skills(text),
    }
}

/// First line, top to bottom, whose trimmed length is strictly between 2 and 50 characters.
pub fn guess_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            len > 2 && len < 50
        })
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

pub fn find_email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}
