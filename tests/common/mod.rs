//! In-process mock of the portfolio backend, served over real HTTP.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use url::Url;

use stockdash::app::App;
use stockdash::config::ClientConfig;
use stockdash::external::http_api::HttpDashboardApi;
use stockdash::interaction::ScriptedInteraction;
use stockdash::models::Holding;
use stockdash::view::PageKind;

pub const PORTFOLIO_ID: u64 = 7;

#[derive(Default)]
pub struct MockBackend {
    pub holdings: Mutex<Vec<Holding>>,
    pub healthy: Mutex<bool>,
}

pub type SharedBackend = Arc<MockBackend>;

fn error(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

async fn fetch_symbol(Path(symbol): Path<String>) -> Response {
    match symbol.as_str() {
        "BAD.NS" => error(
            StatusCode::NOT_FOUND,
            json!({"message": format!("No data found for {}", symbol)}),
        ),
        "HTML.NS" => (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response(),
        _ => Json(json!({"status": "fetched", "symbol": symbol, "rows": 250})).into_response(),
    }
}

async fn upload(State(backend): State<SharedBackend>, mut multipart: Multipart) -> Response {
    let mut contents = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            contents = field.text().await.ok();
        }
    }

    let Some(contents) = contents.filter(|c| !c.trim().is_empty()) else {
        return error(StatusCode::BAD_REQUEST, json!({"error": "No file provided"}));
    };

    // "symbol,qty,avg" rows after a header line
    let parsed: Vec<Holding> = contents
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.split(',');
            Some(Holding {
                symbol: cols.next()?.trim().to_string(),
                qty: cols.next()?.trim().parse().ok()?,
                avg: cols.next()?.trim().parse().ok()?,
            })
        })
        .collect();

    if parsed.is_empty() {
        return error(StatusCode::BAD_REQUEST, json!({"error": "Invalid file format"}));
    }

    backend.holdings.lock().extend(parsed);
    Json(json!({"status": "imported", "portfolio_id": PORTFOLIO_ID})).into_response()
}

async fn holdings(State(backend): State<SharedBackend>) -> Json<Vec<Holding>> {
    Json(backend.holdings.lock().clone())
}

async fn clear(State(backend): State<SharedBackend>) -> Json<serde_json::Value> {
    backend.holdings.lock().clear();
    Json(json!({}))
}

async fn health(State(backend): State<SharedBackend>) -> Json<serde_json::Value> {
    let status = if *backend.healthy.lock() { "ok" } else { "degraded" };
    Json(json!({ "status": status }))
}

async fn analytics(State(backend): State<SharedBackend>) -> Json<serde_json::Value> {
    let holdings = backend.holdings.lock().clone();
    if holdings.is_empty() {
        return Json(json!({}));
    }

    let total: f64 = holdings.iter().map(|h| h.qty * h.avg).sum();
    let composition: Vec<_> = holdings
        .iter()
        .map(|h| {
            json!({
                "symbol": h.symbol,
                "quantity": h.qty,
                "avg_price": h.avg,
                "value": h.qty * h.avg,
                "percentage": h.qty * h.avg / total * 100.0,
            })
        })
        .collect();
    let top: Vec<_> = holdings
        .iter()
        .map(|h| {
            json!({
                "symbol": h.symbol,
                "value": h.qty * h.avg,
                "percentage": h.qty * h.avg / total * 100.0,
            })
        })
        .collect();

    Json(json!({
        "total_value": total,
        "total_stocks": holdings.len(),
        "composition": composition,
        "top_holdings": top,
    }))
}

async fn symbols(State(backend): State<SharedBackend>) -> Json<serde_json::Value> {
    let value: Vec<_> = backend
        .holdings
        .lock()
        .iter()
        .map(|h| json!({ "value": h.symbol }))
        .collect();
    Json(json!({ "value": value }))
}

async fn chart(Path(symbol): Path<String>) -> Response {
    let points = match symbol.as_str() {
        "SHORT.NS" => 10,
        "TCS.NS" | "INFY.NS" | "RELIANCE.NS" | "HDFCBANK.NS" => 60,
        _ => return error(StatusCode::NOT_FOUND, json!({"error": "No data"})),
    };

    let labels: Vec<String> = (0..points)
        .map(|i| format!("2024-{:02}-{:02}", i / 28 + 1, i % 28 + 1))
        .collect();
    let prices: Vec<f64> = (0..points).map(|i| 3500.0 + (i as f64 * 0.7).sin() * 20.0).collect();
    let volumes = vec![2_000_000.0; points];

    Json(json!({
        "symbol": symbol,
        "labels": labels,
        "prices": prices,
        "volumes": volumes,
        "count": points,
    }))
    .into_response()
}

async fn recent_data() -> Json<serde_json::Value> {
    Json(json!([{
        "symbol": "TCS.NS",
        "date": "2024-03-01",
        "time": "15:30",
        "open": 3500.0,
        "high": 3550.5,
        "low": 3490.0,
        "close": 3540.25,
        "volume": 1200000,
        "change": 40.25,
        "change_percent": 1.15,
    }]))
}

pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/fetch/:symbol", get(fetch_symbol))
        .route("/upload-groww", post(upload))
        .route("/holdings", get(holdings))
        .route("/clear-portfolio", post(clear))
        .route("/health", get(health))
        .route("/api/portfolio-analytics", get(analytics))
        .route("/api/portfolio-symbols", get(symbols))
        .route("/api/chart/:symbol", get(chart))
        .route("/api/recent-data", get(recent_data))
        .with_state(backend)
}

/// Serves the mock on an ephemeral local port.
pub async fn spawn_backend(holdings: Vec<Holding>) -> (SharedBackend, Url) {
    let backend = Arc::new(MockBackend {
        holdings: Mutex::new(holdings),
        healthy: Mutex::new(true),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, Url::parse(&format!("http://{}", addr)).unwrap())
}

pub fn holding(symbol: &str, qty: f64, avg: f64) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        qty,
        avg,
    }
}

pub fn config(base_url: Url, page: PageKind) -> ClientConfig {
    ClientConfig {
        base_url,
        page,
        // Keep the refresh jobs out of the way
        holdings_refresh: Duration::from_secs(3600),
        stats_refresh: Duration::from_secs(3600),
        alert_ttl: Duration::from_secs(30),
        request_timeout: Duration::from_secs(5),
        training_delay: Duration::from_millis(50),
    }
}

pub async fn start_app(base_url: Url, page: PageKind, interaction: ScriptedInteraction) -> App {
    let config = config(base_url, page);
    let api = HttpDashboardApi::new(config.base_url.clone(), config.request_timeout).unwrap();
    App::start_with_rng(
        &config,
        Arc::new(api),
        Arc::new(interaction),
        StdRng::seed_from_u64(42),
    )
    .await
    .unwrap()
}
