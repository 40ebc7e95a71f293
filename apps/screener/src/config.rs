use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_COOLDOWN_MS: u64 = 6_500;
const DEFAULT_RETRY_DELAY_MS: u64 = 10_000;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub email_address: String,
    pub email_password: String,
    pub smtp_host: String,
    pub notifications_enabled: bool,
    /// Minimum interval between two consecutive model calls.
    pub model_cooldown: Duration,
    /// Fixed delay before the single retry of a failed model call.
    pub model_retry_delay: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            email_address: require_env("EMAIL_ADDRESS")?,
            email_password: require_env("EMAIL_PASSWORD")?,
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| DEFAULT_SMTP_HOST.to_string()),
            notifications_enabled: parse_flag(std::env::var("NOTIFICATIONS_ENABLED").ok())
                .context("NOTIFICATIONS_ENABLED must be true or false")?,
            model_cooldown: millis_env("MODEL_COOLDOWN_MS", DEFAULT_COOLDOWN_MS)?,
            model_retry_delay: millis_env("MODEL_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn millis_env(key: &str, default_ms: u64) -> Result<Duration> {
    let ms = match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of milliseconds"))?,
        Err(_) => default_ms,
    };
    Ok(Duration::from_millis(ms))
}

/// Missing means enabled.
fn parse_flag(raw: Option<String>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}
