//! Domain layer - Core business logic and models.
//!
//! Pure logic for the dashboard: the fixed-weight allocator, ticker
//! normalization, USD formatting, and the shapes of the content the
//! other tabs display. No I/O here; everything is testable in isolation.

pub mod allocation;
pub mod market;
pub mod money;
pub mod ticker;

// Re-export core types for convenience
pub use allocation::{
    AllocationError, AllocationLine, AllocationRequest, AllocationResult, Allocator,
};
pub use market::{
    AboutPage, AboutSection, Confidence, ModelInsights, Mover, MoverBoard, Prediction, Signal,
    StockInsight, Tab,
};
pub use ticker::{Ticker, resolve_ticker};
