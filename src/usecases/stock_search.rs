//! Stock Search - Ticker Lookup Workflow
//!
//! Resolves the ticker from the two search inputs (typed text wins
//! over the dropdown) and asks the insight source for its profile.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::market::StockInsight;
use crate::domain::ticker::{Ticker, resolve_ticker};
use crate::ports::insights::InsightSource;

/// Why a search produced no insight.
#[derive(Debug, Error)]
pub enum SearchError {
  /// Neither a typed ticker nor a dropdown selection was given.
  #[error("Please enter or select a stock ticker to search.")]
  MissingTicker,
  /// The source has nothing for this ticker.
  #[error("No information available for {0}")]
  NotFound(Ticker),
  /// The insight source failed.
  #[error(transparent)]
  Source(#[from] anyhow::Error),
}

/// Looks up stock insight through an [`InsightSource`].
#[derive(Clone)]
pub struct StockSearch {
  source: Arc<dyn InsightSource>,
}

impl StockSearch {
  pub fn new(source: Arc<dyn InsightSource>) -> Self {
    Self { source }
  }

  /// Search using the typed input and/or the dropdown selection.
  ///
  /// # Errors
  /// See [`SearchError`].
  #[instrument(skip(self))]
  pub async fn search(
    &self,
    typed: Option<&str>,
    selected: Option<&str>,
  ) -> Result<StockInsight, SearchError> {
    let Some(ticker) = resolve_ticker(typed, selected) else {
      debug!("Search without ticker");
      return Err(SearchError::MissingTicker);
    };

    match self.source.stock_insight(&ticker).await {
      Ok(Some(insight)) => {
        debug!(%ticker, "Stock insight served");
        Ok(insight)
      }
      Ok(None) => Err(SearchError::NotFound(ticker)),
      Err(e) => {
        warn!(%ticker, error = %e, "Insight source failed");
        Err(SearchError::Source(e))
      }
    }
  }

  /// Tickers for the dropdown.
  ///
  /// # Errors
  /// Propagates insight source failures.
  pub async fn available_tickers(&self) -> anyhow::Result<Vec<Ticker>> {
    self.source.available_tickers().await
  }
}
