//! Config Hot-Reload — Watch config.toml for Changes
//!
//! Periodically re-reads config.toml and compares it with the last
//! version seen. On change, the file is re-validated and the new
//! config is published through a `tokio::sync::watch` channel, so
//! allocation bounds can be tuned without a restart.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, instrument, warn};

use super::AppConfig;

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Watches config.toml for changes and broadcasts updates.
///
/// Polls rather than using a filesystem watcher, which behaves
/// differently across Linux/macOS/Docker volumes.
pub struct ConfigWatcher {
    /// Path to config.toml.
    config_path: PathBuf,
    /// Watch channel sender for config updates.
    config_tx: watch::Sender<AppConfig>,
    /// Hash of the file contents last loaded.
    last_hash: Option<u64>,
    /// Time between checks.
    interval: Duration,
}

impl ConfigWatcher {
    /// Create a new config watcher.
    ///
    /// Returns the watcher and a `watch::Receiver` that always holds
    /// the latest valid config.
    pub fn new(
        config_path: impl Into<PathBuf>,
        initial_config: AppConfig,
    ) -> (Self, watch::Receiver<AppConfig>) {
        let (config_tx, config_rx) = watch::channel(initial_config);

        let watcher = Self {
            config_path: config_path.into(),
            config_tx,
            last_hash: None,
            interval: DEFAULT_POLL_INTERVAL,
        };

        (watcher, config_rx)
    }

    /// Override the polling period.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the config watcher loop until shutdown.
    #[instrument(skip(self, shutdown_rx), fields(path = %self.config_path.display()))]
    pub async fn run(mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Config watcher started"
        );

        self.last_hash = self.compute_hash().await;

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Config watcher shutting down");
                    return Ok(());
                }
                () = tokio::time::sleep(self.interval) => {
                    self.check_and_reload().await;
                }
            }
        }
    }

    /// Reload if the file changed. Returns whether a new config was published.
    async fn check_and_reload(&mut self) -> bool {
        let new_hash = self.compute_hash().await;

        if new_hash == self.last_hash {
            debug!("Config unchanged");
            return false;
        }

        info!("Config change detected, reloading");

        let path = self.config_path.to_string_lossy().into_owned();
        match super::loader::load_config(&path) {
            Ok(new_config) => {
                self.last_hash = new_hash;
                self.config_tx.send_replace(new_config);
                info!("Config reloaded successfully");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to reload config — keeping current");
                false
            }
        }
    }

    async fn compute_hash(&self) -> Option<u64> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let content = tokio::fs::read_to_string(&self.config_path).await.ok()?;

        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Some(hasher.finish())
    }
}
