mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod optimization;
mod profile;
mod routes;
mod scan;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, OptimizerBackend};
use crate::llm_client::LlmClient;
use crate::optimization::optimizer::{HostedOptimizer, LocalOptimizer, ResumeOptimizer};
use crate::profile::store::FileProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ApplyNinja API v{}", env!("CARGO_PKG_VERSION"));

    let optimizer = build_optimizer(&config)?;
    info!("Optimizer backend: {}", optimizer.backend());

    let profiles = Arc::new(FileProfileStore::new(config.profile_path.clone()));
    info!("Profile store at {}", config.profile_path.display());

    let state = AppState {
        config: config.clone(),
        optimizer,
        profiles,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the optimizer named by config. The hosted backend without a token
/// still starts, but every call will be rejected upstream.
fn build_optimizer(config: &Config) -> Result<Arc<dyn ResumeOptimizer>> {
    match config.optimizer_backend {
        OptimizerBackend::Hosted => {
            if !config.has_huggingface_token() {
                warn!("OPTIMIZER_BACKEND=hosted but HUGGINGFACE_TOKEN is not set");
            }
            let llm = LlmClient::new(
                config.hf_api_url.clone(),
                config.huggingface_token.clone(),
                config.hf_timeout_secs.map(Duration::from_secs),
            )?;
            info!(
                "LLM client initialized (endpoint: {}, prompt: {:?})",
                llm.api_url(),
                config.prompt_variant
            );
            Ok(Arc::new(HostedOptimizer::new(llm, config.prompt_variant)))
        }
        OptimizerBackend::Local => Ok(Arc::new(LocalOptimizer)),
    }
}
