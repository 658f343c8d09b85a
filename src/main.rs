//! Syllabus Extractor Server
//!
//! Serves a search page and a small JSON API that cuts one subject's pages
//! out of the published syllabus PDF.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabus_extractor::build_router;
use syllabus_extractor::config::Config;
use syllabus_extractor::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "syllabus_extractor=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Syllabus Extractor v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Syllabus source: {}", config.source.url);
    tracing::info!("Artifact directory: {}", config.artifacts.dir.display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.server.host))?;

    let app_state = AppState::new(config).context("Failed to initialize application state")?;

    // Warm the cache so the first search does not pay for the download
    let warm_state = app_state.clone();
    tokio::spawn(async move {
        match warm_state.syllabus_document().await {
            Ok(document) => tracing::info!("Syllabus ready ({} bytes)", document.bytes().len()),
            Err(e) => tracing::warn!("Initial syllabus load failed: {}. Will retry on first request", e),
        }
    });

    let app = build_router(app_state);

    tracing::info!("Syllabus Extractor listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
