//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `InsightSource`: prediction content (movers, stock insight, about)

pub mod insights;

pub use insights::InsightSource;
