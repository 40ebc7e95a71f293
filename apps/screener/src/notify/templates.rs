use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The three status emails a candidate can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTemplate {
    Shortlisted,
    UnderReview,
    NotSelected,
}

impl NotificationTemplate {
    pub fn subject(self) -> &'static str {
        match self {
            NotificationTemplate::Shortlisted => "You're shortlisted!",
            NotificationTemplate::UnderReview => "Resume Under Manual Review",
            NotificationTemplate::NotSelected => "Application Status",
        }
    }

    pub fn body(self, name: &str) -> String {
        StatusLetter {
            template: self,
            name,
        }
        .to_string()
    }
}

/// Plain-text body of a status email addressed to one candidate.
struct StatusLetter<'a> {
    template: NotificationTemplate,
    name: &'a str,
}

impl Display for StatusLetter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hi {},", self.name)?;
        writeln!(f)?;
        match self.template {
            NotificationTemplate::Shortlisted => {
                writeln!(
                    f,
                    "Congratulations! Your resume has been shortlisted for the next round of interviews."
                )?;
                writeln!(f)?;
                writeln!(
                    f,
                    "If you're interested, please reply to this email and confirm your availability."
                )?;
                writeln!(f)?;
                writeln!(f, "Best regards,")?;
            }
            NotificationTemplate::UnderReview => {
                writeln!(f, "Your profile is under manual screening by our recruitment team.")?;
                writeln!(f)?;
                writeln!(f, "We will get back to you if there's a suitable fit.")?;
                writeln!(f)?;
                writeln!(f, "Best regards,")?;
            }
            NotificationTemplate::NotSelected => {
                writeln!(f, "Thank you for your application.")?;
                writeln!(f)?;
                writeln!(f, "At this time, your profile has not been shortlisted.")?;
                writeln!(f)?;
                writeln!(f, "Best wishes for your future opportunities,")?;
            }
        }
        write!(f, "HR Team")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortlisted_letter() {
        let body = NotificationTemplate::Shortlisted.body("Jane Doe");
        assert!(body.starts_with("Hi Jane Doe,\n\nCongratulations!"));
        assert!(body.ends_with("Best regards,\nHR Team"));
    }

    #[test]
    fn test_under_review_letter() {
        let body = NotificationTemplate::UnderReview.body("Sam");
        assert!(body.contains("under manual screening"));
    }

    #[test]
    fn test_not_selected_letter() {
        let body = NotificationTemplate::NotSelected.body("Sam");
        assert!(body.contains("has not been shortlisted"));
        assert!(body.ends_with("Best wishes for your future opportunities,\nHR Team"));
    }

    #[test]
    fn test_subjects_are_distinct() {
        let subjects = [
            NotificationTemplate::Shortlisted.subject(),
            NotificationTemplate::UnderReview.subject(),
            NotificationTemplate::NotSelected.subject(),
        ];
        assert_eq!(subjects[0], "You're shortlisted!");
        assert_ne!(subjects[1], subjects[2]);
    }
}
