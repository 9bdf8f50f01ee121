//! Dashboard content types.
//!
//! Records served by the non-allocation tabs: predicted movers,
//! per-ticker insight, and the About page. Values come from an
//! `InsightSource` port; the domain only defines their shape.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ticker::Ticker;

// ────────────────────────────────────────────
// Tabs
// ────────────────────────────────────────────

/// The four dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    PortfolioMovers,
    InvestmentSuggestor,
    StockSearch,
    About,
}

impl Tab {
    pub const ALL: [Self; 4] = [
        Self::PortfolioMovers,
        Self::InvestmentSuggestor,
        Self::StockSearch,
        Self::About,
    ];

    /// Tab label as shown in the tab bar.
    pub const fn title(self) -> &'static str {
        match self {
            Self::PortfolioMovers => "Portfolio Tops & Drops",
            Self::InvestmentSuggestor => "Investment Suggestor",
            Self::StockSearch => "Stock Search",
            Self::About => "About",
        }
    }
}

// ────────────────────────────────────────────
// Movers
// ────────────────────────────────────────────

/// Model confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// A stock expected to move significantly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mover {
    pub ticker: Ticker,
    /// Last price in USD.
    pub current_price: Decimal,
    /// Predicted move in percent (negative for decliners).
    pub predicted_change_pct: Decimal,
    /// Price implied by the prediction.
    pub target_price: Decimal,
    pub confidence: Confidence,
}

impl Mover {
    pub fn is_gainer(&self) -> bool {
        self.predicted_change_pct.is_sign_positive() && !self.predicted_change_pct.is_zero()
    }
}

/// Contents of the "Tops & Drops" tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoverBoard {
    pub gainers: Vec<Mover>,
    pub decliners: Vec<Mover>,
    /// When the underlying model last produced these numbers.
    pub model_updated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────
// Stock insight
// ────────────────────────────────────────────

/// Directional call for a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

/// Model prediction over a fixed horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Horizon label, e.g. "1 Week".
    pub horizon: String,
    pub signal: Signal,
    pub target_price: Decimal,
}

/// Qualitative model notes shown under the price panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInsights {
    pub trend: String,
    pub support_level: Decimal,
    pub resistance_level: Decimal,
    pub news_sentiment: String,
    pub volatility: Confidence,
}

/// Everything the Stock Search tab shows for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInsight {
    pub ticker: Ticker,
    pub company_name: String,
    pub current_price: Decimal,
    /// Absolute change since previous close.
    pub price_change: Decimal,
    /// Relative change since previous close, in percent.
    pub price_change_pct: Decimal,
    pub prediction: Prediction,
    pub market_cap: Decimal,
    /// Pre-formatted market cap, e.g. `$2.75T`.
    pub market_cap_label: String,
    pub insights: ModelInsights,
    pub news: Vec<String>,
}

// ────────────────────────────────────────────
// About
// ────────────────────────────────────────────

/// A titled block of bullet points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    pub title: String,
    pub items: Vec<String>,
}

/// Contents of the About tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutPage {
    pub summary: String,
    pub sections: Vec<AboutSection>,
    pub disclaimer: Vec<String>,
    pub version: String,
}
