mod api;
mod cache;
mod config;
mod constants;
mod forecast;
mod generator;
mod http_client;
mod regions;
mod types;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::api::router;
use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::generator::{spawn_refresh_worker, SnapshotGenerator};
use crate::http_client::HttpTransport;
use crate::regions::RegionCatalog;
use crate::types::AppState;
use crate::utils::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Arc::new(Config::from_env()?);
    let catalog = Arc::new(RegionCatalog::load(&cfg.regions_file).await?);

    let http = Client::builder()
        .timeout(cfg.request_timeout)
        .user_agent("approach-viz-wx/1.0")
        .build()
        .context("Failed to build reqwest client")?;

    let cache = Arc::new(SnapshotCache::new());
    let generator = Arc::new(SnapshotGenerator::new(
        HttpTransport::new(http),
        cfg.forecast_base_url.clone(),
        catalog.clone(),
        cache.clone(),
    ));
    let state = AppState {
        cfg: cfg.clone(),
        catalog,
        cache,
        generator: generator.clone(),
    };

    spawn_refresh_worker(generator, cfg.refresh_interval);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.listen_addr))?;

    info!("Winds aloft service listening on {}", cfg.listen_addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
