//! Request handlers for the four dashboard tabs.

use std::num::NonZeroU32;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::adapters::metrics::MetricsRegistry;
use crate::config::AppConfig;
use crate::domain::allocation::AllocationRequest;
use crate::domain::market::{AboutPage, MoverBoard, StockInsight, Tab};
use crate::domain::ticker::Ticker;
use crate::ports::insights::InsightSource;
use crate::usecases::investment_suggestor::{AmountForm, InvestmentSuggestor, Suggestion};
use crate::usecases::stock_search::{SearchError, StockSearch};

use super::error::ApiError;

/// Application state shared by all handlers.
pub struct AppState {
    /// Latest validated config.
    pub config_rx: watch::Receiver<AppConfig>,
    pub suggestor: InvestmentSuggestor,
    pub search: StockSearch,
    pub insights: Arc<dyn InsightSource>,
    pub metrics: Arc<MetricsRegistry>,
    /// Global quota on suggestion requests.
    pub suggestion_limiter: DefaultDirectRateLimiter,
}

impl AppState {
    /// Wire use cases and the rate limiter from the current config.
    ///
    /// The rate limit quota is fixed at construction; later config
    /// reloads only affect the allocation bounds.
    pub fn new(
        config_rx: watch::Receiver<AppConfig>,
        insights: Arc<dyn InsightSource>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let per_minute = NonZeroU32::new(config_rx.borrow().rate_limits.max_suggestions_per_minute)
            .unwrap_or(NonZeroU32::MIN);

        Self {
            suggestor: InvestmentSuggestor::new(config_rx.clone()),
            search: StockSearch::new(Arc::clone(&insights)),
            suggestion_limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            config_rx,
            insights,
            metrics,
        }
    }

    fn hit(&self, route: &str) {
        self.metrics.requests.with_label_values(&[route]).inc();
    }
}

/// One entry of the tab bar.
#[derive(Debug, Serialize)]
pub struct TabInfo {
    pub id: Tab,
    pub title: &'static str,
}

/// Page header plus tab bar.
#[derive(Debug, Serialize)]
pub struct TabsResponse {
    pub title: String,
    pub caption: String,
    pub tabs: Vec<TabInfo>,
}

/// List the tabs with the dashboard title.
pub async fn tabs(State(state): State<Arc<AppState>>) -> Json<TabsResponse> {
    state.hit("tabs");
    let (title, caption) = {
        let cfg = state.config_rx.borrow();
        (cfg.dashboard.name.clone(), cfg.dashboard.caption.clone())
    };

    Json(TabsResponse {
        title,
        caption,
        tabs: Tab::ALL
            .iter()
            .map(|&id| TabInfo {
                id,
                title: id.title(),
            })
            .collect(),
    })
}

/// Predicted gainers and decliners.
pub async fn movers(State(state): State<Arc<AppState>>) -> Result<Json<MoverBoard>, ApiError> {
    state.hit("movers");
    Ok(Json(state.insights.movers().await?))
}

/// Amount input bounds for the suggestor form.
pub async fn suggestion_form(State(state): State<Arc<AppState>>) -> Json<AmountForm> {
    state.hit("suggestion_form");
    Json(state.suggestor.form())
}

/// Split the requested amount into a suggestion.
pub async fn create_suggestion(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Result<Json<Suggestion>, ApiError> {
    state.hit("suggestions");

    if state.suggestion_limiter.check().is_err() {
        state.metrics.suggestions.with_label_values(&["rate_limited"]).inc();
        return Err(ApiError::RateLimited);
    }

    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Unreadable suggestion request");
        state.metrics.suggestions.with_label_values(&["invalid_body"]).inc();
        ApiError::from(rejection)
    })?;

    match state.suggestor.suggest(request.amount) {
        Ok(suggestion) => {
            state.metrics.suggestions.with_label_values(&["generated"]).inc();
            if let Some(amount) = suggestion.amount.to_f64() {
                state.metrics.suggestion_amount_usd.observe(amount);
            }
            Ok(Json(suggestion))
        }
        Err(e) => {
            state.metrics.suggestions.with_label_values(&["refused"]).inc();
            Err(e.into())
        }
    }
}

/// Stock search inputs: the typed ticker and the dropdown selection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub ticker: Option<String>,
    pub selected: Option<String>,
}

/// Look up a ticker.
pub async fn search_stock(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<StockInsight>, ApiError> {
    state.hit("stocks");

    let Query(query) = query.map_err(|rejection| {
        state.metrics.stock_searches.with_label_values(&["invalid_query"]).inc();
        ApiError::from(rejection)
    })?;

    let result = state
        .search
        .search(query.ticker.as_deref(), query.selected.as_deref())
        .await;

    let outcome = match &result {
        Ok(_) => "found",
        Err(SearchError::MissingTicker) => "missing_ticker",
        Err(SearchError::NotFound(_)) => "not_found",
        Err(SearchError::Source(_)) => "error",
    };
    state.metrics.stock_searches.with_label_values(&[outcome]).inc();
    debug!(outcome, "Stock search handled");

    Ok(Json(result?))
}

/// Tickers offered in the search dropdown.
pub async fn list_tickers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ticker>>, ApiError> {
    state.hit("tickers");
    Ok(Json(state.search.available_tickers().await?))
}

/// About page content.
pub async fn about(State(state): State<Arc<AppState>>) -> Result<Json<AboutPage>, ApiError> {
    state.hit("about");
    Ok(Json(state.insights.about().await?))
}
