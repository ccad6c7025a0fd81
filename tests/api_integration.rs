//! Integration tests against a running dashboard backend.
//!
//! All tests are `#[ignore]` because they require the backend to be up.
//! The base URL comes from `STOCKDASH_API_URL` (a `.env` file is honoured)
//! and falls back to `http://localhost:3000`.
//!
//! Run with:
//! ```bash
//! STOCKDASH_API_URL=http://localhost:3000 cargo test --test api_integration -- --ignored
//! ```

use std::time::Duration;

use stockdash_sdk::prelude::*;

fn client() -> StockdashClient {
    let _ = dotenvy::dotenv();
    let url = std::env::var("STOCKDASH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    StockdashClient::builder()
        .base_url(&url)
        .timeout(Duration::from_secs(60))
        .read_retry(RetryPolicy::Idempotent)
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn historical_with_indicators() {
    let client = client();
    let mut query = HistoricalQuery::new("AAPL");
    query.indicators = vec![Indicator::Sma, Indicator::Rsi];

    let points = client.stocks().historical(&query).await.unwrap();
    assert!(!points.is_empty(), "expected daily bars for AAPL");
    assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
    assert!(points.iter().any(|p| p.sma.is_some()));
    assert!(points.iter().all(|p| p.macd.is_none()));
}

#[tokio::test]
#[ignore]
async fn stock_info_is_cached() {
    let client = client();
    let symbol = Symbol::new("msft");

    let first = client.stocks().info(&symbol).await.unwrap();
    assert!(!first.name.is_empty());
    let second = client.stocks().info(&symbol).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
#[ignore]
async fn forecast_returns_future_points() {
    let client = client();
    let mut view = ViewState::default();
    view.set_forecast_period(5).unwrap();

    let points = client.stocks().forecast(&view.forecast_request()).await.unwrap();
    assert!(!points.is_empty());
}

#[tokio::test]
#[ignore]
async fn unknown_symbol_surfaces_an_error_or_empty_series() {
    let client = client();
    let query = HistoricalQuery::new("NOT-A-TICKER-123");
    match client.stocks().historical(&query).await {
        Ok(points) => assert!(points.is_empty()),
        Err(e) => assert!(!e.user_message().is_empty()),
    }
}

#[tokio::test]
#[ignore]
async fn dashboard_initial_load() {
    let mut dashboard = Dashboard::new(client(), DashboardConfig::default());
    dashboard.refresh_now().await.unwrap();

    let state = dashboard.snapshot().await;
    assert_eq!(state.error(), None);
    assert!(!state.historical().is_empty());
    assert!(state.info().is_some());
    dashboard.teardown().await;
}
