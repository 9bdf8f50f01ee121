//! Insight Source Port - Prediction Content Interface
//!
//! Defines the trait the dashboard uses to fetch predicted movers,
//! per-ticker insight, the ticker dropdown and the About page.
//! Today only the static placeholder adapter implements it; a model
//! backed adapter plugs in here without touching the use cases.

use async_trait::async_trait;

use crate::domain::market::{AboutPage, MoverBoard, StockInsight};
use crate::domain::ticker::Ticker;

/// Trait for prediction content providers.
#[async_trait]
pub trait InsightSource: Send + Sync + 'static {
  /// Predicted top gainers and decliners.
  async fn movers(&self) -> anyhow::Result<MoverBoard>;

  /// Insight for a single ticker, or `None` if the source has none.
  async fn stock_insight(&self, ticker: &Ticker) -> anyhow::Result<Option<StockInsight>>;

  /// Tickers offered in the search dropdown.
  async fn available_tickers(&self) -> anyhow::Result<Vec<Ticker>>;

  /// About page content.
  async fn about(&self) -> anyhow::Result<AboutPage>;

  /// Check whether the source can serve requests.
  async fn is_healthy(&self) -> bool;
}
