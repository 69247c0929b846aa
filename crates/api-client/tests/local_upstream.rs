//! Drives `AlphaVantageClient` against a throwaway local server.

use api_client::{AlphaVantageClient, MarketDataGateway, OutputSize};
use axum::{Router, extract::Query, routing::get};
use core_types::Ticker;
use std::collections::HashMap;
use std::time::Duration;

const SERIES: &str = r#"{
    "Meta Data": {"2. Symbol": "IBM"},
    "Time Series (Daily)": {
        "2024-01-02": {"1. open": "162.8", "2. high": "163.3", "3. low": "160.4", "4. close": "161.5", "5. volume": "3825045"},
        "2024-01-03": {"1. open": "161.0", "2. high": "161.7", "3. low": "160.1", "4. close": "160.1", "5. volume": "4086133"}
    }
}"#;

async fn upstream(Query(params): Query<HashMap<String, String>>) -> String {
    match params.get("symbol").map(String::as_str) {
        Some("IBM") => {
            assert_eq!(params.get("function").map(String::as_str), Some("TIME_SERIES_DAILY"));
            assert_eq!(params.get("apikey").map(String::as_str), Some("secret"));
            SERIES.to_string()
        }
        Some("BUSY") => r#"{"Note": "Thank you for using Alpha Vantage!"}"#.to_string(),
        Some("SLOW") => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            SERIES.to_string()
        }
        _ => r#"{"Error Message": "Invalid API call."}"#.to_string(),
    }
}

async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().route("/query", get(upstream)))
            .await
            .unwrap();
    });
    format!("http://{addr}/query")
}

fn ticker(raw: &str) -> Ticker {
    Ticker::parse(raw).unwrap()
}

#[tokio::test]
async fn fetches_and_parses_a_daily_series() {
    let client =
        AlphaVantageClient::new("secret", spawn_upstream().await, Duration::from_secs(5)).unwrap();
    let bars = client.fetch_daily(&ticker("IBM"), OutputSize::Compact).await.unwrap();
    assert_eq!(bars.len(), 2);
    assert!(bars[0].date < bars[1].date);
}

#[tokio::test]
async fn upstream_error_markers_become_typed_errors() {
    let client =
        AlphaVantageClient::new("secret", spawn_upstream().await, Duration::from_secs(5)).unwrap();
    let busy = client.fetch_daily(&ticker("BUSY"), OutputSize::Full).await.unwrap_err();
    let bogus = client.fetch_daily(&ticker("BOGUS"), OutputSize::Full).await.unwrap_err();
    assert_eq!(busy.kind(), "rate-limited");
    assert_eq!(bogus.kind(), "invalid-symbol");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let upstream = spawn_upstream().await;
    let client =
        AlphaVantageClient::new("secret", upstream, Duration::from_millis(200)).unwrap();
    let err = client.fetch_daily(&ticker("SLOW"), OutputSize::Compact).await.unwrap_err();
    assert_eq!(err.kind(), "timeout");
}
