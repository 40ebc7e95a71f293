use std::sync::Arc;

use crate::config::Config;
use crate::screening::pipeline::ScreeningPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the long-lived model, extractor and mailer handles.
    pub pipeline: Arc<ScreeningPipeline>,
}
