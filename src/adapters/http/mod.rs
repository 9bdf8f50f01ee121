//! Dashboard HTTP API
//!
//! JSON endpoints consumed by the dashboard UI, one group per tab.
//! Rendering stays on the client; this layer only maps use-case
//! results and errors onto HTTP.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::broadcast;
use tracing::{info, instrument};

pub use error::{ApiError, ErrorResponse};
pub use handlers::AppState;

/// Build the `/api/v1` router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/tabs", get(handlers::tabs))
        // Portfolio Tops & Drops
        .route("/api/v1/movers", get(handlers::movers))
        // Investment Suggestor
        .route("/api/v1/suggestions/form", get(handlers::suggestion_form))
        .route("/api/v1/suggestions", post(handlers::create_suggestion))
        // Stock Search
        .route("/api/v1/stocks", get(handlers::search_stock))
        .route("/api/v1/stocks/tickers", get(handlers::list_tickers))
        // About
        .route("/api/v1/about", get(handlers::about))
        .with_state(state)
}

/// Serve the dashboard API until shutdown.
///
/// # Errors
/// Fails if the address cannot be bound or the server errors.
#[instrument(skip(state, shutdown_rx))]
pub async fn serve(
    state: Arc<AppState>,
    bind_address: String,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    Ok(())
}
