mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod notify;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractionChain;
use crate::llm_client::{LlmClient, PacedModel, Pacing};
use crate::notify::{DisabledMailer, Mailer, SmtpMailer};
use crate::routes::build_router;
use crate::screening::pipeline::ScreeningPipeline;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client behind the pacing rules
    let llm = LlmClient::new(config.groq_api_key.clone())?;
    let pacing = Pacing {
        cooldown: config.model_cooldown,
        retry_delay: config.model_retry_delay,
    };
    let model = Arc::new(PacedModel::new(Arc::new(llm), pacing));
    info!(
        "LLM client initialized (model: {}, cooldown: {}ms, retry delay: {}ms)",
        llm_client::MODEL,
        pacing.cooldown.as_millis(),
        pacing.retry_delay.as_millis()
    );

    // Text layer → per-page text → OCR
    let extractor = Arc::new(ExtractionChain::default());

    let mailer: Arc<dyn Mailer> = if config.notifications_enabled {
        info!("Notifications via {} as {}", config.smtp_host, config.email_address);
        Arc::new(SmtpMailer::from_config(&config))
    } else {
        info!("Notifications disabled");
        Arc::new(DisabledMailer)
    };

    let state = AppState {
        config: config.clone(),
        pipeline: Arc::new(ScreeningPipeline::new(model, extractor, mailer)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
