//! Investment Suggestor - Amount Split Workflow
//!
//! Wraps the fixed-weight `Allocator` with the bounds currently in
//! config, stamps each suggestion with an id and timestamp, and logs
//! refusals. The bounds are read from the config watch channel on
//! every call, so a reload takes effect on the next request.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::allocation::{AllocationError, AllocationLine, Allocator};
use crate::domain::money::format_usd;

const CLOSING_NOTE: &str = "Portfolio suggestion generated! Remember to do your own research.";

/// Amount input settings for the suggestor form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmountForm {
  pub min_amount: Decimal,
  pub max_amount: Decimal,
  pub default_amount: Decimal,
  pub step: Decimal,
}

/// One row of a suggestion as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionLine {
  pub ticker: String,
  pub asset_class: String,
  /// Whole-number percentage of the total.
  pub allocation_pct: Decimal,
  pub amount: Decimal,
  pub rationale: String,
}

impl From<AllocationLine> for SuggestionLine {
  fn from(line: AllocationLine) -> Self {
    Self {
      allocation_pct: line.percent(),
      ticker: line.ticker,
      asset_class: line.asset_class,
      amount: line.amount,
      rationale: line.rationale,
    }
  }
}

/// A computed portfolio suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
  pub id: Uuid,
  pub generated_at: DateTime<Utc>,
  /// e.g. "Investment Suggestions for $1,000.00".
  pub headline: String,
  pub amount: Decimal,
  pub lines: Vec<SuggestionLine>,
  pub note: String,
}

/// Produces suggestions within the configured amount bounds.
#[derive(Debug, Clone)]
pub struct InvestmentSuggestor {
  /// Latest validated config.
  config_rx: watch::Receiver<AppConfig>,
}

impl InvestmentSuggestor {
  pub const fn new(config_rx: watch::Receiver<AppConfig>) -> Self {
    Self { config_rx }
  }

  /// Allocator for the bounds in effect right now.
  pub fn allocator(&self) -> Allocator {
    Allocator::from_config(&self.config_rx.borrow().allocator)
  }

  /// Current form settings.
  pub fn form(&self) -> AmountForm {
    let cfg = self.config_rx.borrow().allocator;
    AmountForm {
      min_amount: cfg.min_amount,
      max_amount: cfg.max_amount,
      default_amount: cfg.default_amount,
      step: cfg.step,
    }
  }

  /// Split `amount` into a suggestion.
  ///
  /// # Errors
  /// `AllocationError::InvalidAmount` when the amount is outside the
  /// configured bounds; no lines are produced.
  #[instrument(skip(self))]
  pub fn suggest(&self, amount: Decimal) -> Result<Suggestion, AllocationError> {
    let allocation = match self.allocator().allocate(amount) {
      Ok(allocation) => allocation,
      Err(e) => {
        warn!(%amount, error = %e, "Suggestion refused");
        return Err(e);
      }
    };

    let suggestion = Suggestion {
      id: Uuid::new_v4(),
      generated_at: Utc::now(),
      headline: format!("Investment Suggestions for {}", format_usd(amount)),
      amount: allocation.amount,
      lines: allocation.lines.into_iter().map(SuggestionLine::from).collect(),
      note: CLOSING_NOTE.to_string(),
    };

    info!(
      id = %suggestion.id,
      %amount,
      lines = suggestion.lines.len(),
      "Suggestion generated"
    );

    Ok(suggestion)
  }
}
