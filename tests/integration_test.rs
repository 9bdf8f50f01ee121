//! Integration Tests - End-to-end Dashboard Component Testing
//!
//! Tests the interaction between use cases, the insight port and the
//! HTTP adapter. Uses mockall for port mocking, tokio::test for async
//! tests, and tower's `oneshot` to drive the router without a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mockall::mock;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tokio::sync::watch;
use tower::ServiceExt;

use stock_prediction_dashboard::adapters::http::{AppState, create_router};
use stock_prediction_dashboard::adapters::metrics::MetricsRegistry;
use stock_prediction_dashboard::adapters::placeholder::StaticInsights;
use stock_prediction_dashboard::config::AppConfig;
use stock_prediction_dashboard::config::loader::parse_config;
use stock_prediction_dashboard::domain::market::{AboutPage, MoverBoard, StockInsight};
use stock_prediction_dashboard::domain::ticker::Ticker;
use stock_prediction_dashboard::ports::insights::InsightSource;
use stock_prediction_dashboard::usecases::stock_search::{SearchError, StockSearch};

// ---- Mock Definitions ----

mock! {
    pub Insights {}

    #[async_trait::async_trait]
    impl InsightSource for Insights {
        async fn movers(&self) -> anyhow::Result<MoverBoard>;
        async fn stock_insight(&self, ticker: &Ticker) -> anyhow::Result<Option<StockInsight>>;
        async fn available_tickers(&self) -> anyhow::Result<Vec<Ticker>>;
        async fn about(&self) -> anyhow::Result<AboutPage>;
        async fn is_healthy(&self) -> bool;
    }
}

// ---- Helpers ----

fn test_config(rate_limit: u32) -> AppConfig {
    parse_config(&format!(
        "[dashboard]\nname = \"Test Dashboard\"\n\n[rate_limits]\nmax_suggestions_per_minute = {rate_limit}\n"
    ))
    .unwrap()
}

fn test_app_with(source: Arc<dyn InsightSource>, rate_limit: u32) -> axum::Router {
    let (_tx, rx) = watch::channel(test_config(rate_limit));
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    create_router(Arc::new(AppState::new(rx, source, metrics)))
}

fn test_app() -> axum::Router {
    test_app_with(Arc::new(StaticInsights::new()), 100)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

async fn post_raw(app: axum::Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

// ---- Stock search against the mocked port ----

#[tokio::test]
async fn test_search_not_found_when_source_has_nothing() {
    let mut source = MockInsights::new();
    source
        .expect_stock_insight()
        .withf(|t| t.as_str() == "ZZZZ")
        .times(1)
        .returning(|_| Ok(None));

    let search = StockSearch::new(Arc::new(source));
    let err = search.search(Some("zzzz"), None).await.unwrap_err();
    assert!(matches!(err, SearchError::NotFound(t) if t.as_str() == "ZZZZ"));
}

#[tokio::test]
async fn test_search_never_queries_source_without_ticker() {
    let mut source = MockInsights::new();
    source.expect_stock_insight().never();

    let search = StockSearch::new(Arc::new(source));
    let err = search.search(Some("  "), None).await.unwrap_err();
    assert!(matches!(err, SearchError::MissingTicker));
}

#[tokio::test]
async fn test_source_failure_maps_to_500() {
    let mut source = MockInsights::new();
    source
        .expect_movers()
        .returning(|| Err(anyhow::anyhow!("model offline")));

    let app = test_app_with(Arc::new(source), 100);
    let (status, json) = get_json(app, "/api/v1/movers").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "model offline");
}

// ---- Tabs ----

#[tokio::test]
async fn test_tabs_listing() {
    let (status, json) = get_json(test_app(), "/api/v1/tabs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Test Dashboard");
    let ids: Vec<&str> = json["tabs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "portfolio_movers",
            "investment_suggestor",
            "stock_search",
            "about"
        ]
    );
}

#[tokio::test]
async fn test_movers_endpoint() {
    let (status, json) = get_json(test_app(), "/api/v1/movers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["gainers"][0]["ticker"], "AAPL");
    assert_eq!(json["gainers"][0]["confidence"], "High");
    assert_eq!(json["decliners"][1]["ticker"], "ZM");
    assert_eq!(json["decliners"][1]["predicted_change_pct"], -4.2);
}

// ---- Investment suggestor ----

#[tokio::test]
async fn test_suggestion_for_one_thousand() {
    let (status, json) =
        post_json(test_app(), "/api/v1/suggestions", json!({ "amount": 1000.0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["headline"], "Investment Suggestions for $1,000.00");

    let lines = json["lines"].as_array().unwrap();
    let got: Vec<(&str, f64)> = lines
        .iter()
        .map(|l| (l["ticker"].as_str().unwrap(), l["amount"].as_f64().unwrap()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("AAPL", 300.0),
            ("GOOGL", 300.0),
            ("VTI", 250.0),
            ("BND", 150.0)
        ]
    );
    assert_eq!(lines[2]["allocation_pct"], 25.0);
    assert_eq!(lines[3]["asset_class"], "Bond ETF");
}

#[tokio::test]
async fn test_suggestion_below_minimum_warns() {
    let (status, json) =
        post_json(test_app(), "/api/v1/suggestions", json!({ "amount": 99.99 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json["warning"],
        "Please enter an investment amount of at least $100."
    );
    assert!(json.get("lines").is_none());
}

#[tokio::test]
async fn test_unreadable_suggestion_body_is_json_400() {
    for body in [r#"{"amount":"abc"}"#, "{}", "not json"] {
        let (status, json) = post_raw(test_app(), "/api/v1/suggestions", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body"),
            "body {body}: {json}"
        );
        assert_eq!(
            json["warning"],
            "Please enter a numeric investment amount."
        );
    }
}

#[tokio::test]
async fn test_suggestion_error_bodies_are_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/suggestions")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{}"#))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
}

#[tokio::test]
async fn test_suggestion_form_bounds() {
    let (status, json) = get_json(test_app(), "/api/v1/suggestions/form").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["min_amount"], 100.0);
    assert_eq!(json["max_amount"], 1_000_000.0);
    assert_eq!(json["default_amount"], 1000.0);
    assert_eq!(json["step"], 100.0);
}

#[tokio::test]
async fn test_suggestions_rate_limited() {
    let app = test_app_with(Arc::new(StaticInsights::new()), 2);

    for _ in 0..2 {
        let (status, _) =
            post_json(app.clone(), "/api/v1/suggestions", json!({ "amount": 500 })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, json) = post_json(app, "/api/v1/suggestions", json!({ "amount": 500 })).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(json["error"].as_str().unwrap().contains("Too many"));
}

#[tokio::test]
async fn test_reloaded_bounds_apply_to_next_request() {
    let (tx, rx) = watch::channel(test_config(100));
    let metrics = Arc::new(MetricsRegistry::new().unwrap());
    let app = create_router(Arc::new(AppState::new(
        rx,
        Arc::new(StaticInsights::new()),
        metrics,
    )));

    tx.send_modify(|cfg| cfg.allocator.min_amount = dec!(500));

    let (status, json) =
        post_json(app, "/api/v1/suggestions", json!({ "amount": 250 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json["warning"],
        "Please enter an investment amount of at least $500."
    );
}

// ---- Stock search over HTTP ----

#[tokio::test]
async fn test_stock_search_prefers_typed_ticker() {
    let (status, json) =
        get_json(test_app(), "/api/v1/stocks?ticker=msft&selected=NVDA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ticker"], "MSFT");
    assert_eq!(json["company_name"], "Fictional Company Inc.");
    assert_eq!(json["prediction"]["signal"], "BUY");
    assert_eq!(json["market_cap_label"], "$2.75T");
}

#[tokio::test]
async fn test_stock_search_missing_ticker() {
    let (status, json) = get_json(test_app(), "/api/v1/stocks?ticker=&selected=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["warning"],
        "Please enter or select a stock ticker to search."
    );
}

#[tokio::test]
async fn test_stock_search_bad_query_is_json_400() {
    let (status, json) =
        get_json(test_app(), "/api/v1/stocks?ticker=AAPL&ticker=MSFT").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string")
    );
}

#[tokio::test]
async fn test_ticker_dropdown() {
    let (status, json) = get_json(test_app(), "/api/v1/stocks/tickers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 8);
    assert_eq!(json[0], "AAPL");
}

// ---- About ----

#[tokio::test]
async fn test_about_page() {
    let (status, json) = get_json(test_app(), "/api/v1/about").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sections"][1]["title"], "How to Use");
    assert_eq!(json["disclaimer"][0], "This is not financial advice.");
}
