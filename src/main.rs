//! Stock Prediction Dashboard — Entry Point
//!
//! Initializes configuration, logging, the placeholder insight
//! source and the dashboard API. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (or $DASHBOARD_CONFIG) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create metrics registry and health state, poll source health
//! 4. Spawn config watcher (hot reload of allocation bounds)
//! 5. Spawn health server (/live + /ready) and metrics server
//! 6. Spawn dashboard API server
//! 7. Wait for SIGINT → graceful shutdown (not ready → stop servers → exit)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use stock_prediction_dashboard::adapters::http::{self, AppState};
use stock_prediction_dashboard::adapters::metrics::health::DEFAULT_HEALTH_POLL;
use stock_prediction_dashboard::adapters::metrics::{HealthServer, HealthState, MetricsRegistry};
use stock_prediction_dashboard::adapters::placeholder::StaticInsights;
use stock_prediction_dashboard::config::hot_reload::ConfigWatcher;
use stock_prediction_dashboard::config::loader::load_config;
use stock_prediction_dashboard::ports::insights::InsightSource;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path =
        std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.dashboard.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.dashboard.name,
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "Starting stock prediction dashboard"
    );

    // ── 3. Shutdown channel, metrics, health ────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to create metrics registry")?);
    let health = Arc::new(HealthState::new());

    let insights: Arc<dyn InsightSource> = Arc::new(StaticInsights::new());
    let monitor_handle = tokio::spawn(Arc::clone(&health).monitor_insights(
        Arc::clone(&insights),
        DEFAULT_HEALTH_POLL,
        shutdown_tx.subscribe(),
    ));

    // ── 4. Config hot reload ────────────────────────────────
    let (watcher, config_rx) = ConfigWatcher::new(&config_path, config.clone());
    let watcher_handle = tokio::spawn(watcher.run(shutdown_tx.subscribe()));

    // ── 5. Health + metrics servers ─────────────────────────
    let health_server = HealthServer::new(Arc::clone(&health), config.metrics.health_port);
    let health_shutdown = shutdown_tx.subscribe();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.run(health_shutdown).await {
            error!(error = %e, "Health server failed");
        }
    });

    let metrics_handle = if config.metrics.enabled {
        let registry = Arc::clone(&metrics);
        let bind = config.metrics.bind_address.clone();
        let metrics_shutdown = shutdown_tx.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = registry.serve(bind, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        }))
    } else {
        warn!("Metrics export disabled");
        None
    };

    // ── 6. Dashboard API ────────────────────────────────────
    let state = Arc::new(AppState::new(config_rx, insights, metrics));
    let api_shutdown = shutdown_tx.subscribe();
    let api_bind = config.server.bind_address.clone();
    let api_handle = tokio::spawn(async move {
        if let Err(e) = http::serve(state, api_bind, api_shutdown).await {
            error!(error = %e, "Dashboard API failed");
        }
    });

    info!("All tasks spawned — dashboard is running");

    // ── 7. Wait for SIGINT ──────────────────────────────────
    signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("SIGINT received, initiating graceful shutdown");

    // Readiness → 503 before the listeners close
    health.begin_shutdown();
    let _ = shutdown_tx.send(());

    let _ = tokio::time::timeout(Duration::from_secs(10), api_handle).await;
    if let Some(handle) = metrics_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), watcher_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), monitor_handle).await;
    health_handle.abort();

    info!("Shutdown complete");
    Ok(())
}
