//! Configuration Module - TOML-based Dashboard Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Allocation bounds, bind addresses and limits are externalized
//! here; the fixed allocation weights are not configurable.

pub mod hot_reload;
pub mod loader;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::allocation::{DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};

/// Top-level dashboard configuration.
///
/// Loaded from `config.toml` at startup and re-read by the
/// `ConfigWatcher`. All fields are validated before use.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
  /// Dashboard identity and logging.
  pub dashboard: DashboardConfig,
  /// Investment suggestor input bounds.
  #[serde(default)]
  pub allocator: AllocatorConfig,
  /// Dashboard API server.
  #[serde(default)]
  pub server: ServerConfig,
  /// Rate limiting configuration.
  #[serde(default)]
  pub rate_limits: RateLimitConfig,
  /// Metrics and monitoring.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Dashboard identity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
  /// Title shown above the tabs.
  pub name: String,
  /// Subtitle shown under the title.
  #[serde(default = "default_caption")]
  pub caption: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Investment amount input bounds.
///
/// Mirrors the amount widget: a minimum, a maximum, the
/// pre-filled value and the increment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AllocatorConfig {
  /// Smallest accepted amount (USD).
  #[serde(default = "default_min_amount")]
  pub min_amount: Decimal,
  /// Largest accepted amount (USD).
  #[serde(default = "default_max_amount")]
  pub max_amount: Decimal,
  /// Pre-filled amount in the form.
  #[serde(default = "default_amount")]
  pub default_amount: Decimal,
  /// Increment for the amount input.
  #[serde(default = "default_step")]
  pub step: Decimal,
}

impl Default for AllocatorConfig {
  fn default() -> Self {
    Self {
      min_amount: default_min_amount(),
      max_amount: default_max_amount(),
      default_amount: default_amount(),
      step: default_step(),
    }
  }
}

/// Dashboard API server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
  /// Bind address for the `/api/v1` routes.
  #[serde(default = "default_server_addr")]
  pub bind_address: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_server_addr(),
    }
  }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
  /// Suggestion requests accepted per minute across all clients.
  #[serde(default = "default_max_suggestions")]
  pub max_suggestions_per_minute: u32,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    Self {
      max_suggestions_per_minute: default_max_suggestions(),
    }
  }
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetricsConfig {
  /// Enable Prometheus metrics export.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Metrics server bind address.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
  /// Health check endpoint port.
  #[serde(default = "default_health_port")]
  pub health_port: u16,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      bind_address: default_metrics_addr(),
      health_port: default_health_port(),
    }
  }
}

// Default value functions for serde

fn default_caption() -> String {
  "Your intelligent assistant for navigating the stock market.".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

const fn default_min_amount() -> Decimal {
  DEFAULT_MIN_AMOUNT
}

const fn default_max_amount() -> Decimal {
  DEFAULT_MAX_AMOUNT
}

fn default_amount() -> Decimal {
  Decimal::ONE_THOUSAND
}

fn default_step() -> Decimal {
  Decimal::ONE_HUNDRED
}

fn default_server_addr() -> String {
  "0.0.0.0:8501".to_string()
}

const fn default_max_suggestions() -> u32 {
  120
}

const fn default_true() -> bool {
  true
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}

const fn default_health_port() -> u16 {
  8080
}
