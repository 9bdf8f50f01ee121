//! Prometheus Metrics Registry - Dashboard Observability
//!
//! Registers and exposes Prometheus metrics for the dashboard API:
//! suggestion outcomes and sizes, stock search outcomes, and
//! per-route request counts.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

/// Centralized Prometheus metrics for the dashboard.
///
/// All metrics follow the naming convention `dashboard_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Suggestion requests by outcome (generated, refused, rate_limited).
    pub suggestions: IntCounterVec,
    /// Amounts of generated suggestions (USD).
    pub suggestion_amount_usd: Histogram,
    /// Stock searches by outcome (found, missing_ticker, not_found, error).
    pub stock_searches: IntCounterVec,
    /// API requests by route.
    pub requests: IntCounterVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    ///
    /// # Errors
    /// Fails if a metric cannot be created or registered.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let suggestions = IntCounterVec::new(
            Opts::new(
                "dashboard_suggestions_total",
                "Investment suggestion requests by outcome",
            ),
            &["outcome"],
        )?;

        let suggestion_amount_usd = Histogram::with_opts(
            HistogramOpts::new(
                "dashboard_suggestion_amount_usd",
                "Amounts split by generated suggestions",
            )
            .buckets(vec![
                100.0, 500.0, 1_000.0, 5_000.0, 10_000.0, 50_000.0, 100_000.0, 1_000_000.0,
            ]),
        )?;

        let stock_searches = IntCounterVec::new(
            Opts::new("dashboard_stock_searches_total", "Stock searches by outcome"),
            &["outcome"],
        )?;

        let requests = IntCounterVec::new(
            Opts::new("dashboard_requests_total", "API requests by route"),
            &["route"],
        )?;

        registry.register(Box::new(suggestions.clone()))?;
        registry.register(Box::new(suggestion_amount_usd.clone()))?;
        registry.register(Box::new(stock_searches.clone()))?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self {
            registry,
            suggestions,
            suggestion_amount_usd,
            stock_searches,
            requests,
        })
    }

    /// Encode all metrics in the Prometheus text format.
    ///
    /// # Errors
    /// Fails if encoding fails or produces invalid UTF-8.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }

    /// Serve Prometheus metrics on the configured bind address.
    ///
    /// # Errors
    /// Fails if the address cannot be bound or the server errors.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let metrics = Arc::clone(&self);

        let app = Router::new().route(
            "/metrics",
            get(move || async move {
                match metrics.render() {
                    Ok(body) => (StatusCode::OK, body),
                    Err(e) => {
                        warn!(error = %e, "Metrics rendering failed");
                        (StatusCode::INTERNAL_SERVER_ERROR, String::new())
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_values() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.suggestions.with_label_values(&["generated"]).inc();
        metrics.suggestion_amount_usd.observe(1000.0);

        let text = metrics.render().unwrap();
        assert!(text.contains("dashboard_suggestions_total{outcome=\"generated\"} 1"));
        assert!(text.contains("dashboard_suggestion_amount_usd_count 1"));
    }
}
