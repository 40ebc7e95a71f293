//! Candidate notifications over an authenticated SMTP relay.
//!
//! Sending is best-effort: a failure is logged and recorded on the candidate,
//! never retried, and never aborts the run.

pub mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::screening::tier::Tier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("mail task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to_name: String,
    pub to_address: String,
    pub subject: String,
    pub body: String,
}

/// What happened to a candidate's notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed { error: String },
    /// No email address, or sending is switched off.
    Skipped,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Sent => f.write_str("sent"),
            NotificationStatus::Failed { error } => write!(f, "failed: {error}"),
            NotificationStatus::Skipped => f.write_str("skipped"),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;

    fn enabled(&self) -> bool {
        true
    }
}

/// Sends the tier's status email to one candidate.
pub async fn notify_candidate(
    mailer: &dyn Mailer,
    address: Option<&str>,
    name: &str,
    tier: Tier,
) -> NotificationStatus {
    let Some(address) = address else {
        return NotificationStatus::Skipped;
    };
    if !mailer.enabled() {
        info!("Notifications disabled; not emailing {address}");
        return NotificationStatus::Skipped;
    }

    let template = tier.notification();
    let email = OutgoingEmail {
        to_name: name.to_string(),
        to_address: address.to_string(),
        subject: template.subject().to_string(),
        body: template.body(name),
    };

    match mailer.send(&email).await {
        Ok(()) => {
            info!("Sent {template:?} notification to {address}");
            NotificationStatus::Sent
        }
        Err(e) => {
            error!("Failed to send email to {name}: {e}");
            NotificationStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Implicit-TLS relay (port 465). A fresh connection per message.
pub struct SmtpMailer {
    host: String,
    from: String,
    password: String,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host: config.smtp_host.clone(),
            from: config.email_address.clone(),
            password: config.email_password.clone(),
        }
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, NotifyError> {
        let from: Mailbox = self.from.parse()?;
        let to = Mailbox::new(Some(email.to_name.clone()), email.to_address.parse()?);
        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let message = self.build_message(email)?;
        let host = self.host.clone();
        let creds = Credentials::new(self.from.clone(), self.password.clone());

        tokio::task::spawn_blocking(move || -> Result<(), NotifyError> {
            let transport = SmtpTransport::relay(&host)?.credentials(creds).build();
            transport.send(&message)?;
            Ok(())
        })
        .await
        .map_err(|e| NotifyError::Task(e.to_string()))?
    }
}

/// Used when `NOTIFICATIONS_ENABLED=false`.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), NotifyError> {
        Ok(())
    }

    fn enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every message; fails on demand.
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub(crate) sent: Mutex<Vec<OutgoingEmail>>,
        pub(crate) fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.fail {
                Err(NotifyError::Task("relay refused connection".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_high_tier_gets_shortlisted_email() {
        let mailer = RecordingMailer::default();
        let status = notify_candidate(&mailer, Some("jane@x.com"), "Jane Doe", Tier::High).await;

        assert_eq!(status, NotificationStatus::Sent);
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_address, "jane@x.com");
        assert_eq!(sent[0].subject, "You're shortlisted!");
        assert!(sent[0].body.starts_with("Hi Jane Doe,"));
    }

    #[tokio::test]
    async fn test_missing_address_is_skipped_silently() {
        let mailer = RecordingMailer::default();
        let status = notify_candidate(&mailer, None, "Unknown", Tier::Low).await;

        assert_eq!(status, NotificationStatus::Skipped);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_recorded_not_raised() {
        let mailer = RecordingMailer {
            fail: true,
            ..Default::default()
        };
        let status = notify_candidate(&mailer, Some("sam@x.com"), "Sam", Tier::Medium).await;

        assert!(matches!(status, NotificationStatus::Failed { ref error } if error.contains("refused")));
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(NotificationStatus::Sent.to_string(), "sent");
        let failed = NotificationStatus::Failed {
            error: "timeout".to_string(),
        };
        assert_eq!(failed.to_string(), "failed: timeout");
    }

    #[tokio::test]
    async fn test_disabled_mailer_skips() {
        let status = notify_candidate(&DisabledMailer, Some("sam@x.com"), "Sam", Tier::High).await;
        assert_eq!(status, NotificationStatus::Skipped);
    }

    #[test]
    fn test_message_builds_for_valid_addresses() {
        let mailer = SmtpMailer {
            host: "smtp.example.com".to_string(),
            from: "hr@example.com".to_string(),
            password: "secret".to_string(),
        };
        let email = OutgoingEmail {
            to_name: "Jane Doe".to_string(),
            to_address: "jane@x.com".to_string(),
            subject: "Application Status".to_string(),
            body: templates::NotificationTemplate::NotSelected.body("Jane Doe"),
        };
        assert!(mailer.build_message(&email).is_ok());
    }

    #[test]
    fn test_message_rejects_malformed_recipient() {
        let mailer = SmtpMailer {
            host: "smtp.example.com".to_string(),
            from: "hr@example.com".to_string(),
            password: "secret".to_string(),
        };
        let email = OutgoingEmail {
            to_name: "Jane".to_string(),
            to_address: "not-an-address".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        };
        assert!(matches!(
            mailer.build_message(&email),
            Err(NotifyError::Address(_))
        ));
    }
}
