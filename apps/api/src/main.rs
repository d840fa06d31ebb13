mod catalog;
mod config;
mod errors;
mod models;
mod routes;
mod selection;
mod session;
mod state;
mod theme;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::related::SkillOverlapRecommender;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::session::{new_store, sweep_idle, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog API v{}", env!("CARGO_PKG_VERSION"));

    // Load the dataset once; it is never mutated afterwards
    let catalog = Catalog::load(config.catalog_path.as_deref()).context("Failed to load catalog")?;

    info!("Default theme for new sessions: {}", config.default_theme);

    let sessions = new_store();
    spawn_session_sweeper(sessions.clone(), config.session_idle_minutes);

    let state = AppState {
        catalog: Arc::new(catalog),
        sessions,
        config: config.clone(),
        recommender: Arc::new(SkillOverlapRecommender),
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

/// Periodically drops idle sessions so abandoned clients do not accumulate.
fn spawn_session_sweeper(sessions: SessionStore, idle_minutes: u32) {
    let max_idle = chrono::Duration::minutes(i64::from(idle_minutes));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            ticker.tick().await;
            sweep_idle(&sessions, max_idle, chrono::Utc::now()).await;
        }
    });
    info!("Idle sessions expire after {idle_minutes} minutes");
}
