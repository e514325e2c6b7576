//! # HTTP and WebSocket Client Tests
//!
//! Repositories against an in-process axum backend.

mod common;

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use common::{client_for, last_request, serve, DEAD_URL};
use fks_client::services::api::{
    DashboardRepository, DataRepository, PortfolioRepository, SignalRepository,
};
use fks_client::{ApiError, Service, UrlOverrides};
use futures_util::StreamExt;
use serde_json::json;
use shared::{AssetPrice, SignalCategory};

const TIMEOUT: Duration = Duration::from_secs(5);

fn quote_json() -> serde_json::Value {
    json!({
        "symbol": "BTC/USD",
        "price": 64000.5,
        "timestamp": 1_700_000_000,
        "provider": "binance",
        "cached": true
    })
}

fn price_router() -> Router {
    Router::new().route("/api/v1/data/price", get(|| async { Json(quote_json()) }))
}

#[tokio::test]
async fn test_get_sends_bearer_and_encoded_query() {
    let (base, log) = serve(price_router()).await;
    let client = client_for(&base);
    client.set_auth_token("abc123");

    let quote = DataRepository::new(client)
        .get_price("BTC/USD", None, true)
        .await
        .unwrap();

    assert_eq!(quote.price, 64000.5);
    assert!(quote.cached);
    let request = last_request(&log);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/api/v1/data/price");
    assert_eq!(request.query.as_deref(), Some("symbol=BTC%2FUSD&use_cache=true"));
    assert_eq!(request.authorization.as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn test_no_bearer_without_token() {
    let (base, log) = serve(price_router()).await;
    let data = DataRepository::new(client_for(&base));

    data.get_price("ETH/USD", Some("kraken"), false).await.unwrap();

    let request = last_request(&log);
    assert_eq!(request.authorization, None);
    assert_eq!(
        request.query.as_deref(),
        Some("symbol=ETH%2FUSD&provider=kraken&use_cache=false")
    );
}

#[tokio::test]
async fn test_configure_redirects_service() {
    let (base, _) = serve(price_router()).await;
    let client = client_for(DEAD_URL);
    let data = DataRepository::new(client.clone());

    let err = data.get_btc_price().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "{err:?}");

    client.configure(UrlOverrides {
        data: Some(base.clone()),
        ..UrlOverrides::default()
    });
    assert_eq!(client.urls().data, base);
    assert_eq!(client.urls().auth, DEAD_URL);

    assert_eq!(data.get_btc_price().await.unwrap().symbol, "BTC/USD");
}

#[tokio::test]
async fn test_status_error_carries_detail() {
    let router = Router::new().route(
        "/api/v1/data/price",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Symbol not found" })),
            )
        }),
    );
    let (base, _) = serve(router).await;

    let err = DataRepository::new(client_for(&base))
        .get_price("NOPE", None, true)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: "Symbol not found".to_string()
        }
    );
}

#[tokio::test]
async fn test_status_error_without_body() {
    let router = Router::new().route(
        "/api/portfolio/value",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let (base, _) = serve(router).await;

    let err = PortfolioRepository::new(client_for(&base))
        .get_portfolio_value()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let router = Router::new().route("/api/v1/data/price", get(|| async { "not json" }));
    let (base, _) = serve(router).await;

    let err = DataRepository::new(client_for(&base))
        .get_btc_price()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_ohlcv_preserves_candle_order() {
    let router = Router::new().route(
        "/api/v1/data/ohlcv",
        get(|| async {
            Json(json!({
                "symbol": "BTC/USD",
                "interval": "1d",
                "provider": "binance",
                "data": [
                    { "timestamp": 3, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 10.0 },
                    { "timestamp": 1, "open": 1.5, "high": 2.5, "low": 1.0, "close": 2.0, "volume": 11.0 },
                    { "timestamp": 2, "open": 2.0, "high": 3.0, "low": 1.5, "close": 2.5, "volume": 12.0 }
                ]
            }))
        }),
    );
    let (base, log) = serve(router).await;

    let series = DataRepository::new(client_for(&base))
        .get_btc_daily_candles()
        .await
        .unwrap();

    let timestamps: Vec<i64> = series.data.iter().map(|c| c.timestamp).collect();
    assert_eq!(timestamps, [3, 1, 2]);
    assert_eq!(series.last_close(), Some(2.5));
    assert!(!series.cached);
    assert_eq!(
        last_request(&log).query.as_deref(),
        Some("symbol=BTC%2FUSD&interval=1d&use_cache=true")
    );
}

#[tokio::test]
async fn test_btc_price_placeholder_when_empty() {
    let router = Router::new().route(
        "/api/assets/prices",
        get(|| async { Json(Vec::<AssetPrice>::new()) }),
    );
    let (base, log) = serve(router).await;

    let price = PortfolioRepository::new(client_for(&base))
        .get_btc_price()
        .await
        .unwrap();

    assert_eq!(price, AssetPrice::btc_placeholder());
    assert_eq!(last_request(&log).query.as_deref(), Some("symbols=BTC"));
}

#[tokio::test]
async fn test_dashboard_reads_partial_payloads() {
    let router = Router::new()
        .route(
            "/api/v1/timeframes/metrics",
            get(|| async {
                Json(json!({
                    "timestamp": "2024-03-06T14:45:00Z",
                    "processing": { "parallel_count": 4, "async_count": 9 }
                }))
            }),
        )
        .route(
            "/api/dashboard/overview",
            get(|| async { Json(json!({ "pnl": 1250.5, "exposure": 0.4 })) }),
        );
    let (base, log) = serve(router).await;
    let dashboard = DashboardRepository::new(client_for(&base));

    let metrics = dashboard.get_timeframe_metrics().await.unwrap();
    assert_eq!(metrics.timestamp.as_deref(), Some("2024-03-06T14:45:00Z"));
    assert_eq!(metrics.processing.unwrap().async_count, 9);
    assert!(metrics.cache.is_none());

    let overview = dashboard.get_dashboard_overview().await.unwrap();
    assert_eq!(overview.pnl, Some(1250.5));
    assert_eq!(overview.risk, None);
    assert_eq!(last_request(&log).path, "/api/dashboard/overview");
}

#[tokio::test]
async fn test_put_and_delete_carry_bearer_and_body() {
    let router = Router::new().route(
        "/api/v1/items/7",
        put(|Json(body): Json<serde_json::Value>| async move { Json(json!({ "echo": body })) })
            .delete(|| async { Json(json!({ "ok": true })) }),
    );
    let (base, log) = serve(router).await;
    // Trailing slash on the base, no leading slash on the endpoint.
    let client = client_for(&format!("{}/", base));
    client.set_auth_token("t1");

    let echoed: serde_json::Value = client
        .put("api/v1/items/7", &json!({ "a": 1 }), Service::Api)
        .await
        .unwrap();
    assert_eq!(echoed, json!({ "echo": { "a": 1 } }));
    let request = last_request(&log);
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/api/v1/items/7");
    assert_eq!(request.authorization.as_deref(), Some("Bearer t1"));

    let deleted: serde_json::Value = client
        .delete("/api/v1/items/7", Service::Api)
        .await
        .unwrap();
    assert_eq!(deleted, json!({ "ok": true }));
    let request = last_request(&log);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/v1/items/7");
    assert_eq!(request.authorization.as_deref(), Some("Bearer t1"));
}

fn signal_json(symbol: &str, strength: &str, confidence: f64) -> serde_json::Value {
    json!({
        "symbol": symbol,
        "signal_type": "BUY",
        "category": "swing",
        "entry_price": 100.0,
        "take_profit": 110.0,
        "stop_loss": 95.0,
        "take_profit_pct": 10.0,
        "stop_loss_pct": 5.0,
        "risk_reward_ratio": 2.0,
        "position_size_pct": 1.0,
        "strength": strength,
        "confidence": confidence,
        "timestamp": "2024-03-06T14:45:00Z",
        "is_valid": true
    })
}

fn signals_router() -> Router {
    Router::new().route(
        "/api/signals/generate",
        get(|| async {
            Json(json!([
                signal_json("A", "STRONG", 0.9),
                signal_json("B", "moderate", 0.8),
                signal_json("C", "strong", 0.5)
            ]))
        }),
    )
}

#[tokio::test]
async fn test_signal_filters_use_last_fetch() {
    let (base, log) = serve(signals_router()).await;
    let signals = SignalRepository::new(client_for(&base));
    assert!(signals.strong_signals().is_empty());

    let fetched = signals
        .generate_signals(SignalCategory::Swing, Some("A,B"), false)
        .await
        .unwrap();
    assert_eq!(fetched.len(), 3);
    assert_eq!(
        last_request(&log).query.as_deref(),
        Some("category=swing&symbols=A%2CB&ai_enhanced=false")
    );

    let strong: Vec<String> = signals.strong_signals().into_iter().map(|s| s.symbol).collect();
    assert_eq!(strong, ["A", "C"]);
    let confident: Vec<String> = signals
        .high_confidence_signals(0.8)
        .into_iter()
        .map(|s| s.symbol)
        .collect();
    assert_eq!(confident, ["A", "B"]);
    assert_eq!(signals.last_signals().len(), 3);
    assert_eq!(log.lock().len(), 1);
}

#[tokio::test]
async fn test_bitcoin_signals_query() {
    let (base, log) = serve(signals_router()).await;
    let signals = SignalRepository::new(client_for(&base));

    signals.get_bitcoin_signals(true).await.unwrap();

    assert_eq!(
        last_request(&log).query.as_deref(),
        Some("category=bitcoin&symbols=BTC%2FUSD%2CBTC%2FUSDT&ai_enhanced=true")
    );
}

async fn stream_two_signals(mut socket: WebSocket) {
    for symbol in ["BTC/USD", "ETH/USD"] {
        let frame = json!({ "symbol": symbol }).to_string();
        if socket.send(Message::Text(frame.into())).await.is_err() {
            return;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}

#[tokio::test]
async fn test_signal_stream_forwards_text_frames() {
    let router = Router::new().route(
        "/api/signals/stream",
        get(|ws: WebSocketUpgrade| async move { ws.on_upgrade(stream_two_signals) }),
    );
    let (base, log) = serve(router).await;
    let client = client_for(&base);
    client.set_auth_token("ws-token");

    let stream = SignalRepository::new(client)
        .connect_signal_stream()
        .await
        .unwrap();
    let frames: Vec<String> = tokio::time::timeout(TIMEOUT, stream.collect::<Vec<_>>())
        .await
        .unwrap()
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(frames.len(), 2);
    assert!(frames[0].contains("BTC/USD"));
    assert!(frames[1].contains("ETH/USD"));
    assert_eq!(
        last_request(&log).authorization.as_deref(),
        Some("Bearer ws-token")
    );
}

#[tokio::test]
async fn test_signal_stream_unreachable() {
    let err = SignalRepository::new(client_for(DEAD_URL))
        .connect_signal_stream()
        .await
        .err()
        .unwrap();

    assert!(matches!(err, ApiError::WebSocket(_)), "{err:?}");
}
