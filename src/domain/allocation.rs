//! Fixed-weight investment allocation.
//!
//! Splits an investment amount across four predefined buckets:
//! two growth stocks, a broad US equity ETF and a bond ETF.
//! The weights are constants (30 / 30 / 25 / 15) and always sum to one,
//! so the allocated amounts always sum back to the requested amount.
//!
//! The allocator is a pure function of its input: no lookup, no
//! randomness, nothing retained between calls.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AllocatorConfig;

use super::money::format_usd_whole;

/// Smallest amount the suggestor accepts by default.
pub const DEFAULT_MIN_AMOUNT: Decimal = dec!(100);

/// Largest amount the suggestor accepts by default.
pub const DEFAULT_MAX_AMOUNT: Decimal = dec!(1000000);

// ────────────────────────────────────────────
// Buckets
// ────────────────────────────────────────────

/// One fixed slot of the suggested portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationBucket {
    /// Ticker the slot is invested in.
    pub ticker: &'static str,
    /// Display label of the asset class.
    pub asset_class: &'static str,
    /// Fraction of the amount placed in this slot.
    pub weight: Decimal,
    /// Static one-line reason for the pick.
    pub rationale: &'static str,
}

/// The four buckets, in presentation order.
pub const BUCKETS: [AllocationBucket; 4] = [
    AllocationBucket {
        ticker: "AAPL",
        asset_class: "Growth Stock",
        weight: dec!(0.30),
        rationale: "Strong growth potential",
    },
    AllocationBucket {
        ticker: "GOOGL",
        asset_class: "Growth Stock",
        weight: dec!(0.30),
        rationale: "Market leader, innovation",
    },
    AllocationBucket {
        ticker: "VTI",
        asset_class: "US Equity ETF",
        weight: dec!(0.25),
        rationale: "Broad market exposure",
    },
    AllocationBucket {
        ticker: "BND",
        asset_class: "Bond ETF",
        weight: dec!(0.15),
        rationale: "Portfolio stability",
    },
];

// ────────────────────────────────────────────
// Request / result records
// ────────────────────────────────────────────

/// Amount the user wants to invest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Amount in USD.
    pub amount: Decimal,
}

/// One row of a computed allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub ticker: String,
    pub asset_class: String,
    /// Fraction of the total (0 – 1).
    pub weight: Decimal,
    /// `request.amount * weight`, unrounded.
    pub amount: Decimal,
    pub rationale: String,
}

impl AllocationLine {
    /// Weight expressed as a whole percentage (30, 30, 25, 15).
    pub fn percent(&self) -> Decimal {
        (self.weight * dec!(100)).normalize()
    }
}

/// Ordered allocation for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The amount that was split.
    pub amount: Decimal,
    /// Lines in bucket order.
    pub lines: Vec<AllocationLine>,
}

impl AllocationResult {
    /// Sum of the allocated amounts.
    pub fn total_allocated(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount).sum()
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Reasons an allocation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Amount outside the accepted range; nothing is computed.
    #[error("investment amount {amount} is outside the accepted range [{minimum}, {maximum}]")]
    InvalidAmount {
        amount: Decimal,
        minimum: Decimal,
        maximum: Decimal,
    },
}

impl AllocationError {
    /// User-facing warning shown instead of a result.
    pub fn warning(&self) -> String {
        match self {
            Self::InvalidAmount {
                amount, maximum, ..
            } if amount > maximum => format!(
                "Please enter an investment amount of at most {}.",
                format_usd_whole(*maximum)
            ),
            Self::InvalidAmount { minimum, .. } => format!(
                "Please enter an investment amount of at least {}.",
                format_usd_whole(*minimum)
            ),
        }
    }
}

// ────────────────────────────────────────────
// Allocator
// ────────────────────────────────────────────

/// Splits amounts across [`BUCKETS`] within an accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator {
    min_amount: Decimal,
    max_amount: Decimal,
}

impl Allocator {
    /// Create an allocator accepting amounts in `[min_amount, max_amount]`.
    pub const fn new(min_amount: Decimal, max_amount: Decimal) -> Self {
        Self {
            min_amount,
            max_amount,
        }
    }

    /// Build from the `[allocator]` config section.
    pub const fn from_config(config: &AllocatorConfig) -> Self {
        Self::new(config.min_amount, config.max_amount)
    }

    pub const fn min_amount(&self) -> Decimal {
        self.min_amount
    }

    pub const fn max_amount(&self) -> Decimal {
        self.max_amount
    }

    /// Split `amount` across the four buckets.
    ///
    /// # Errors
    /// [`AllocationError::InvalidAmount`] when `amount` is below the
    /// minimum or above the maximum.
    pub fn allocate(&self, amount: Decimal) -> Result<AllocationResult, AllocationError> {
        if amount < self.min_amount || amount > self.max_amount {
            return Err(AllocationError::InvalidAmount {
                amount,
                minimum: self.min_amount,
                maximum: self.max_amount,
            });
        }

        let lines = BUCKETS
            .iter()
            .map(|bucket| AllocationLine {
                ticker: bucket.ticker.to_string(),
                asset_class: bucket.asset_class.to_string(),
                weight: bucket.weight,
                amount: amount * bucket.weight,
                rationale: bucket.rationale.to_string(),
            })
            .collect();

        Ok(AllocationResult { amount, lines })
    }

    /// Convenience wrapper taking an [`AllocationRequest`].
    ///
    /// # Errors
    /// Same as [`Allocator::allocate`].
    pub fn allocate_request(
        &self,
        request: &AllocationRequest,
    ) -> Result<AllocationResult, AllocationError> {
        self.allocate(request.amount)
    }
}

impl Default for Allocator {
    /// Default: $100 minimum, $1,000,000 maximum.
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT)
    }
}
