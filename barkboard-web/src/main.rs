//! barkboard-web - Dog catalog browsing service
//!
//! Fetches the shelter record feed into an in-memory cache and serves the
//! catalog, review surfaces, and favorites over JSON plus an embedded web
//! UI.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use barkboard_common::config::{resolve_data_folder, Settings};
use barkboard_common::events::EventBus;
use barkboard_common::favorites::FavoriteStore;
use barkboard_web::cache::CatalogCache;
use barkboard_web::upstream::UpstreamClient;
use barkboard_web::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;

/// Command-line arguments for barkboard-web
#[derive(Parser, Debug)]
#[command(name = "barkboard-web")]
#[command(about = "Dog catalog browsing service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8030", env = "BARKBOARD_PORT")]
    port: u16,

    /// Data folder for settings and favorites (overrides BARKBOARD_DATA
    /// and the config file)
    #[arg(short, long)]
    data_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting BarkBoard Web (barkboard-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Zero-config startup with 4-tier data folder resolution
    let data_folder = resolve_data_folder(args.data_folder.as_deref())?;
    std::fs::create_dir_all(&data_folder)
        .with_context(|| format!("Failed to create data folder {:?}", data_folder))?;
    info!("Data folder: {}", data_folder.display());

    let settings = Settings::load(&data_folder).context("Failed to load settings")?;
    info!("Upstream feed: {}", settings.upstream.base_url);

    let bus = EventBus::new(256);

    let client =
        UpstreamClient::new(&settings.upstream).context("Failed to build upstream client")?;
    let cache = Arc::new(CatalogCache::new(
        client,
        Duration::from_secs(settings.cache.dogs_stale_secs),
        Duration::from_secs(settings.cache.review_stale_secs),
        bus.clone(),
    ));

    // Background refresh loop; the first tick performs the initial fetch
    cache.spawn_refresh_task();

    let store = FavoriteStore::new(&data_folder);
    let state = AppState::new(cache, store, bus);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("barkboard-web listening on http://{}", addr);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
