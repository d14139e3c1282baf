mod auth;
mod config;
mod errors;
mod intake;
mod models;
mod optimize;
mod routes;
mod state;
mod templates;
mod workflow;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthStore;
use crate::config::Config;
use crate::optimize::KeywordEngine;
use crate::routes::build_router;
use crate::state::AppState;
use crate::workflow::manager::SessionManager;

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

    info!("Starting RebuildCV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the optimization engine (KeywordEngine by default)
    let engine = Arc::new(KeywordEngine::new(Duration::from_millis(
        config.engine_latency_ms,
    )));
    info!(
        "Optimization engine initialized (latency {}ms, auto re-optimize: {})",
        config.engine_latency_ms, config.auto_reoptimize
    );

    let state = AppState {
        sessions: SessionManager::new(),
        engine,
        auth: AuthStore::new(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
