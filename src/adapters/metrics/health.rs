//! Health Check Server - Liveness and Readiness Probes
//!
//! Exposes /live and /ready endpoints via axum 0.7 for Docker
//! health checks. Readiness drops to 503 once shutdown begins or
//! when the insight source reports unhealthy. The source is polled
//! by [`HealthState::monitor_insights`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::ports::insights::InsightSource;

/// Default interval between insight source health checks.
pub const DEFAULT_HEALTH_POLL: Duration = Duration::from_secs(15);

/// Shared health state polled by readiness probes.
#[derive(Debug)]
pub struct HealthState {
    /// Cleared when graceful shutdown starts.
    pub accepting_traffic: AtomicBool,
    /// Last known insight source health.
    pub insights_healthy: AtomicBool,
}

impl HealthState {
    /// Create a new health state (all healthy by default).
    pub const fn new() -> Self {
        Self {
            accepting_traffic: AtomicBool::new(true),
            insights_healthy: AtomicBool::new(true),
        }
    }

    /// Check if the system is ready to serve traffic.
    pub fn is_ready(&self) -> bool {
        self.accepting_traffic.load(Ordering::Relaxed)
            && self.insights_healthy.load(Ordering::Relaxed)
    }

    /// Mark the service as draining.
    pub fn begin_shutdown(&self) {
        self.accepting_traffic.store(false, Ordering::Relaxed);
    }

    /// Ask the source for its health and record the answer.
    pub async fn refresh_insights(&self, source: &dyn InsightSource) -> bool {
        let healthy = source.is_healthy().await;
        let previous = self.insights_healthy.swap(healthy, Ordering::Relaxed);
        if previous != healthy {
            if healthy {
                info!("Insight source recovered");
            } else {
                warn!("Insight source unhealthy, readiness dropped");
            }
        }
        healthy
    }

    /// Poll the source every `interval` until shutdown.
    pub async fn monitor_insights(
        self: Arc<Self>,
        source: Arc<dyn InsightSource>,
        interval: Duration,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Insight health monitor stopped");
                    return;
                }
                _ = ticker.tick() => {
                    self.refresh_insights(source.as_ref()).await;
                }
            }
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Axum-based health check HTTP server.
pub struct HealthServer {
    /// Health state shared with all components.
    state: Arc<HealthState>,
    /// Bind port (default 8080 from config).
    port: u16,
}

impl HealthServer {
    /// Create a new health server.
    pub const fn new(state: Arc<HealthState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Probe routes, exposed separately for tests.
    pub fn router(state: Arc<HealthState>) -> Router {
        Router::new()
            .route("/live", get(Self::liveness))
            .route("/ready", get(Self::readiness))
            .with_state(state)
    }

    /// Serve the probes until shutdown.
    ///
    /// # Errors
    /// Fails if the port cannot be bound or the server errors.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let app = Self::router(Arc::clone(&self.state));

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(address = %addr, "Health server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }

    /// Liveness probe: always returns 200 if the process is running.
    async fn liveness() -> impl IntoResponse {
        (StatusCode::OK, "OK")
    }

    /// Readiness probe: 200 while accepting traffic with a healthy source.
    async fn readiness(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
        if state.is_ready() {
            (StatusCode::OK, "READY")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }
}
