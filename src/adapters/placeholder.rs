//! Placeholder Insight Source - Static Demo Content
//!
//! Serves the fixed demo numbers shown while no prediction model is
//! wired in. Every ticker searched gets the same fictional company
//! profile; movers and the About page are constant.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::market::{
    AboutPage, AboutSection, Confidence, ModelInsights, Mover, MoverBoard, Prediction, Signal,
    StockInsight,
};
use crate::domain::money::format_usd_compact;
use crate::domain::ticker::Ticker;
use crate::ports::insights::InsightSource;

type MoverRow = (&'static str, Decimal, Decimal, Decimal, Confidence);

const GAINERS: [MoverRow; 5] = [
    ("AAPL", dec!(170.34), dec!(5.2), dec!(179.20), Confidence::High),
    ("MSFT", dec!(280.50), dec!(4.8), dec!(293.96), Confidence::High),
    ("GOOGL", dec!(2500.70), dec!(4.5), dec!(2613.23), Confidence::Medium),
    ("TSLA", dec!(800.10), dec!(6.1), dec!(848.91), Confidence::High),
    ("NVDA", dec!(260.25), dec!(3.9), dec!(270.39), Confidence::Medium),
];

const DECLINERS: [MoverRow; 5] = [
    ("NFLX", dec!(350.10), dec!(-3.5), dec!(337.85), Confidence::Medium),
    ("ZM", dec!(100.20), dec!(-4.2), dec!(95.99), Confidence::High),
    ("PTON", dec!(25.50), dec!(-5.0), dec!(24.23), Confidence::Medium),
    ("RBLX", dec!(40.75), dec!(-2.8), dec!(39.61), Confidence::Low),
    ("COIN", dec!(150.90), dec!(-3.1), dec!(146.22), Confidence::Medium),
];

const DROPDOWN_TICKERS: [&str; 8] = ["AAPL", "MSFT", "GOOGL", "TSLA", "NVDA", "AMZN", "NFLX", "META"];

const COMPANY_NAME: &str = "Fictional Company Inc.";

const MARKET_CAP: Decimal = dec!(2750000000000);

/// Static content source used until a real model is available.
#[derive(Debug, Clone, Default)]
pub struct StaticInsights;

impl StaticInsights {
    pub const fn new() -> Self {
        Self
    }

    fn model_updated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 27, 8, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn rows(rows: &[MoverRow]) -> Vec<Mover> {
        rows.iter()
            .filter_map(|&(symbol, price, change, target, confidence)| {
                Some(Mover {
                    ticker: Ticker::parse(symbol)?,
                    current_price: price,
                    predicted_change_pct: change,
                    target_price: target,
                    confidence,
                })
            })
            .collect()
    }

    fn insight_for(ticker: &Ticker) -> StockInsight {
        StockInsight {
            ticker: ticker.clone(),
            company_name: COMPANY_NAME.to_string(),
            current_price: dec!(175.50),
            price_change: dec!(1.20),
            price_change_pct: dec!(0.69),
            prediction: Prediction {
                horizon: "1 Week".to_string(),
                signal: Signal::Buy,
                target_price: dec!(180.00),
            },
            market_cap: MARKET_CAP,
            market_cap_label: format_usd_compact(MARKET_CAP),
            insights: ModelInsights {
                trend: "Positive short-term trend observed.".to_string(),
                support_level: dec!(168.00),
                resistance_level: dec!(182.50),
                news_sentiment: "Moderately Positive".to_string(),
                volatility: Confidence::Medium,
            },
            news: vec![
                format!("{COMPANY_NAME} announces new product line."),
                format!("Analysts upgrade {COMPANY_NAME} to 'Outperform'."),
                "Market reacts positively to Fictional Company's earnings report.".to_string(),
            ],
        }
    }

    fn section(title: &str, items: &[&str]) -> AboutSection {
        AboutSection {
            title: title.to_string(),
            items: items.iter().map(ToString::to_string).collect(),
        }
    }

    fn about_page() -> AboutPage {
        AboutPage {
            summary: "This dashboard provides AI-driven stock market insights. \
                      Our goal is to offer a tool that aids in understanding market \
                      trends and potential stock movements."
                .to_string(),
            sections: vec![
                Self::section(
                    "The Prediction Model",
                    &[
                        "Model Type: (e.g., LSTM Recurrent Neural Network / Gradient Boosting Machine / Time Series Analysis - ARIMA)",
                        "Data Sources: historical stock prices (OHLCV), fundamental data (P/E ratio, EPS, Market Cap), optional news sentiment and macroeconomic indicators.",
                        "Features Used: (e.g., Lagged prices, trading volume, moving averages, RSI, MACD, sentiment scores).",
                        "Prediction Horizon: (e.g., 1 day, 1 week, 1 month ahead).",
                        "Training & Validation: trained on data up to [Date] and validated on [Date Range]; metrics include [e.g., MAE, RMSE, Accuracy].",
                    ],
                ),
                Self::section(
                    "How to Use",
                    &[
                        "Portfolio Tops & Drops: Shows stocks our model predicts will have the largest upward or downward movements.",
                        "Investment Suggestor: Enter a dollar amount to receive a sample portfolio allocation based on risk and growth potential.",
                        "Stock Search: Look up individual stocks for detailed information, historical charts, and specific predictions.",
                    ],
                ),
            ],
            disclaimer: vec![
                "This is not financial advice.".to_string(),
                "The predictions and suggestions provided by this dashboard are for informational and educational purposes only.".to_string(),
                "Stock market investments carry risk, and past performance is not indicative of future results.".to_string(),
                "Always conduct your own thorough research and consult with a qualified financial advisor before making any investment decisions.".to_string(),
                "The creators of this dashboard are not liable for any financial losses incurred based on the information presented here.".to_string(),
            ],
            version: format!("{} (UI Demo)", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[async_trait]
impl InsightSource for StaticInsights {
    async fn movers(&self) -> anyhow::Result<MoverBoard> {
        Ok(MoverBoard {
            gainers: Self::rows(&GAINERS),
            decliners: Self::rows(&DECLINERS),
            model_updated_at: Self::model_updated_at(),
        })
    }

    async fn stock_insight(&self, ticker: &Ticker) -> anyhow::Result<Option<StockInsight>> {
        Ok(Some(Self::insight_for(ticker)))
    }

    async fn available_tickers(&self) -> anyhow::Result<Vec<Ticker>> {
        Ok(DROPDOWN_TICKERS
            .iter()
            .filter_map(|s| Ticker::parse(s))
            .collect())
    }

    async fn about(&self) -> anyhow::Result<AboutPage> {
        Ok(Self::about_page())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
