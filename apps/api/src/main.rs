mod config;
mod errors;
mod preferences;
mod render;
mod resume;
mod routes;
mod session;
mod state;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::preferences::InMemoryPreferenceStore;
use crate::routes::build_router;
use crate::session::handlers::evict_idle_sessions;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Session capacity: {}, default theme: {}",
        config.max_sessions,
        config.default_theme
    );

    let state = AppState {
        sessions: SessionStore::new(
            config.max_sessions,
            chrono::Duration::minutes(config.session_idle_minutes),
        ),
        preferences: Arc::new(InMemoryPreferenceStore::default()),
        config: config.clone(),
    };

    // Background sweep so idle sessions are dropped even when nobody opens new ones
    let sweep_state = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            evict_idle_sessions(&sweep_state).await;
        }
    });

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
