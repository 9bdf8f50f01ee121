//! Ticker symbols and search-input resolution.

use serde::{Deserialize, Serialize};

/// Upper-cased, trimmed, non-empty ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize free-form input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pick the ticker to search for.
///
/// Typed input wins over the dropdown selection; blank values count as
/// absent. `None` means the user gave neither.
pub fn resolve_ticker(typed: Option<&str>, selected: Option<&str>) -> Option<Ticker> {
    typed
        .and_then(Ticker::parse)
        .or_else(|| selected.and_then(Ticker::parse))
}
