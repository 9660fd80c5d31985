mod config;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::aggregator::JobAggregator;
use crate::llm_client::LlmClient;
use crate::matching::prompts::PromptTemplates;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-match API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.openai_api_key.clone(),
        config.llm_model.clone(),
        config.llm_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Prompt templates: built-ins unless PROMPT_DIR overrides them
    let prompts = PromptTemplates::load(config.prompt_dir.as_deref())?;

    // Job sources share one HTTP client with an explicit timeout
    let jobs = JobAggregator::from_config(&config)?;
    info!(
        "Job aggregator initialized (sources: {:?}, timeout: {:?})",
        jobs.kinds(),
        config.fetch_timeout
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        prompts: Arc::new(prompts),
        jobs,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
