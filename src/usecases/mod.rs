//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! dashboard's interactive workflows.
//!
//! Use cases:
//! - `InvestmentSuggestor`: bounded fixed-weight allocation
//! - `StockSearch`: ticker resolution and insight lookup

pub mod investment_suggestor;
pub mod stock_search;

pub use investment_suggestor::{AmountForm, InvestmentSuggestor, Suggestion, SuggestionLine};
pub use stock_search::{SearchError, StockSearch};
