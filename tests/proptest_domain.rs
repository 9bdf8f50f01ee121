//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the allocator and the ticker
//! normalization keep their invariants across random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stock_prediction_dashboard::domain::allocation::{AllocationError, Allocator};
use stock_prediction_dashboard::domain::ticker::resolve_ticker;

/// Amounts in cents between $100.00 and $1,000,000.00.
fn valid_amount() -> impl Strategy<Value = Decimal> {
    (10_000i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Amounts in cents strictly below $100.00 (including negatives).
fn below_minimum() -> impl Strategy<Value = Decimal> {
    (-100_000i64..10_000).prop_map(|cents| Decimal::new(cents, 2))
}

// ── Allocator Properties ────────────────────────────────────

proptest! {
    /// The four amounts always add back up to the request.
    #[test]
    fn allocated_amounts_sum_to_request(amount in valid_amount()) {
        let result = Allocator::default().allocate(amount).unwrap();
        let total = result.total_allocated();
        prop_assert_eq!(total, amount, "allocated {} of {}", total, amount);
    }

    /// Weights are fixed and in fixed order regardless of amount.
    #[test]
    fn weights_fixed_and_ordered(amount in valid_amount()) {
        let result = Allocator::default().allocate(amount).unwrap();
        let weights: Vec<Decimal> = result.lines.iter().map(|l| l.weight).collect();
        prop_assert_eq!(weights, vec![dec!(0.30), dec!(0.30), dec!(0.25), dec!(0.15)]);

        let tickers: Vec<&str> = result.lines.iter().map(|l| l.ticker.as_str()).collect();
        prop_assert_eq!(tickers, vec!["AAPL", "GOOGL", "VTI", "BND"]);
    }

    /// Each line is exactly amount × weight and never negative.
    #[test]
    fn each_line_is_amount_times_weight(amount in valid_amount()) {
        let result = Allocator::default().allocate(amount).unwrap();
        for line in &result.lines {
            prop_assert_eq!(line.amount, amount * line.weight);
            prop_assert!(line.amount > Decimal::ZERO);
        }
    }

    /// Anything under the minimum is refused with no lines.
    #[test]
    fn below_minimum_is_invalid(amount in below_minimum()) {
        let err = Allocator::default().allocate(amount).unwrap_err();
        let is_invalid_amount = matches!(err, AllocationError::InvalidAmount { .. });
        prop_assert!(is_invalid_amount);
    }

    /// The allocator is pure: same input, same output.
    #[test]
    fn allocation_is_deterministic(amount in valid_amount()) {
        let allocator = Allocator::default();
        prop_assert_eq!(allocator.allocate(amount), allocator.allocate(amount));
    }
}

// ── Ticker Resolution Properties ────────────────────────────

proptest! {
    /// A non-blank typed ticker always wins and comes back upper-cased.
    #[test]
    fn typed_ticker_wins(typed in "[a-zA-Z]{1,5}", selected in "[A-Z]{1,5}") {
        let ticker = resolve_ticker(Some(typed.as_str()), Some(selected.as_str())).unwrap();
        prop_assert_eq!(ticker.as_str(), typed.to_uppercase());
    }

    /// Blank typed input falls back to the selection.
    #[test]
    fn blank_typed_falls_back(spaces in " {0,4}", selected in "[A-Z]{1,5}") {
        let ticker = resolve_ticker(Some(spaces.as_str()), Some(selected.as_str())).unwrap();
        prop_assert_eq!(ticker.as_str(), selected.as_str());
    }
}
