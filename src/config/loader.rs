//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    path = %path.display(),
    min_amount = %config.allocator.min_amount,
    max_amount = %config.allocator.max_amount,
    bind = %config.server.bind_address,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
///
/// # Errors
/// Fails on malformed TOML or when validation rules are violated.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A non-empty dashboard name
/// - Ordered, positive allocation bounds
/// - Positive input step and rate limit
/// - Non-empty bind addresses
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.dashboard.name.trim().is_empty(),
    "Dashboard name must not be empty"
  );

  // Allocator bounds
  let alloc = &config.allocator;
  anyhow::ensure!(
    alloc.min_amount > Decimal::ZERO,
    "allocator.min_amount must be positive, got {}",
    alloc.min_amount
  );
  anyhow::ensure!(
    alloc.min_amount <= alloc.max_amount,
    "allocator.min_amount ({}) must not exceed max_amount ({})",
    alloc.min_amount,
    alloc.max_amount
  );
  anyhow::ensure!(
    alloc.default_amount >= alloc.min_amount && alloc.default_amount <= alloc.max_amount,
    "allocator.default_amount ({}) must be within [{}, {}]",
    alloc.default_amount,
    alloc.min_amount,
    alloc.max_amount
  );
  anyhow::ensure!(
    alloc.step > Decimal::ZERO,
    "allocator.step must be positive, got {}",
    alloc.step
  );

  // Rate limit validation
  anyhow::ensure!(
    config.rate_limits.max_suggestions_per_minute > 0,
    "max_suggestions_per_minute must be positive"
  );

  // Addresses
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );
  anyhow::ensure!(
    !config.metrics.bind_address.is_empty(),
    "metrics.bind_address must not be empty"
  );

  Ok(())
}
