//! Call pacing for the hosted model.
//!
//! Two rules, both fixed: consecutive calls are spaced by at least `cooldown`
//! (measured from the end of the previous call, whatever its outcome), and a
//! failed call is retried exactly once after `retry_delay`.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::{LlmError, TextModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub cooldown: Duration,
    pub retry_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(6_500),
            retry_delay: Duration::from_secs(10),
        }
    }
}

/// A `TextModel` guarded by the pacing rules. Shared by scorer and judge so
/// the cooldown spans both kinds of call.
pub struct PacedModel {
    model: Arc<dyn TextModel>,
    pacing: Pacing,
    last_call: Mutex<Option<Instant>>,
    /// Operator-facing retry notices, drained by the caller.
    notices: StdMutex<Vec<String>>,
}

impl PacedModel {
    pub fn new(model: Arc<dyn TextModel>, pacing: Pacing) -> Self {
        Self {
            model,
            pacing,
            last_call: Mutex::new(None),
            notices: StdMutex::new(Vec::new()),
        }
    }

    /// Sends `prompt`, retrying once on failure. `purpose` only labels logs.
    pub async fn complete(&self, prompt: &str, purpose: &str) -> Result<String, LlmError> {
        match self.attempt(prompt).await {
            Ok(reply) => Ok(reply),
            Err(first) => {
                warn!(
                    "Model call for {purpose} failed ({first}); retrying in {}ms",
                    self.pacing.retry_delay.as_millis()
                );
                self.push_notice(format!("Model call for {purpose} failed ({first}). Retrying..."));
                tokio::time::sleep(self.pacing.retry_delay).await;
                self.attempt(prompt)
                    .await
                    .map_err(|last| LlmError::RetryExhausted {
                        first: first.to_string(),
                        last: Box::new(last),
                    })
            }
        }
    }

    /// Retry notices recorded since the last call to this method.
    pub fn take_notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }

    fn push_notice(&self, notice: String) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, LlmError> {
        let mut last_call = self.last_call.lock().await;
        if let Some(at) = *last_call {
            let ready = at + self.pacing.cooldown;
            if ready > Instant::now() {
                debug!("Cooling down before next model call");
                tokio::time::sleep_until(ready).await;
            }
        }
        let result = self.model.complete(prompt).await;
        *last_call = Some(Instant::now());
        result
    }
}
