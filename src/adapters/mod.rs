//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` and exposes
//! the use cases to the outside world.
//!
//! Adapter categories:
//! - `http`: dashboard JSON API (axum)
//! - `metrics`: Prometheus metrics export and health checks
//! - `placeholder`: static demo content behind `InsightSource`

pub mod http;
pub mod metrics;
pub mod placeholder;
