//! In-process HTTP stubs for the Radar and Telegram APIs used by tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};

/// One recorded Radar request.
#[derive(Debug, Clone)]
pub struct RecordedQuery {
    /// "netflows" or "http".
    pub endpoint: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Stub Radar API serving fixed series values and recording every request.
pub struct RadarStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedQuery>>>,
}

#[derive(Clone)]
struct RadarStubState {
    volume_values: Vec<serde_json::Value>,
    trend_values: Vec<serde_json::Value>,
    requests: Arc<Mutex<Vec<RecordedQuery>>>,
}

pub async fn spawn_radar_stub(
    volume_values: Vec<serde_json::Value>,
    trend_values: Vec<serde_json::Value>,
) -> RadarStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = RadarStubState {
        volume_values,
        trend_values,
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/netflows/timeseries", get(serve_netflows))
        .route("/http/timeseries", get(serve_http))
        .with_state(state);

    RadarStub {
        base_url: spawn(app).await,
        requests,
    }
}

/// Stub Radar API answering 500 on both endpoints.
pub async fn spawn_failing_radar_stub() -> String {
    let app = Router::new()
        .route("/netflows/timeseries", get(serve_error))
        .route("/http/timeseries", get(serve_error));
    spawn(app).await
}

async fn serve_netflows(
    State(state): State<RadarStubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    record(&state, "netflows", &headers, params);
    Json(serie_body(&state.volume_values))
}

async fn serve_http(
    State(state): State<RadarStubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    record(&state, "http", &headers, params);
    Json(serie_body(&state.trend_values))
}

async fn serve_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "stub error")
}

fn serie_body(values: &[serde_json::Value]) -> serde_json::Value {
    serde_json::json!({ "result": { "serie_0": { "values": values } } })
}

fn record(
    state: &RadarStubState,
    endpoint: &str,
    headers: &HeaderMap,
    params: HashMap<String, String>,
) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.requests.lock().expect("stub lock").push(RecordedQuery {
        endpoint: endpoint.to_string(),
        params,
        authorization,
    });
}

/// Stub Telegram Bot API recording every sendMessage body.
pub struct TelegramStub {
    pub base_url: String,
    pub sent: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl TelegramStub {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("stub lock").len()
    }
}

#[derive(Clone)]
struct TelegramStubState {
    sent: Arc<Mutex<Vec<serde_json::Value>>>,
}

pub async fn spawn_telegram_stub(bot_token: &str) -> TelegramStub {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            &format!("/bot{}/sendMessage", bot_token),
            post(serve_send_message),
        )
        .with_state(TelegramStubState {
            sent: Arc::clone(&sent),
        });

    TelegramStub {
        base_url: spawn(app).await,
        sent,
    }
}

/// Stub Telegram Bot API answering 500.
pub async fn spawn_failing_telegram_stub(bot_token: &str) -> String {
    let app = Router::new().route(
        &format!("/bot{}/sendMessage", bot_token),
        post(serve_error),
    );
    spawn(app).await
}

async fn serve_send_message(
    State(state): State<TelegramStubState>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    state.sent.lock().expect("stub lock").push(body);
    Json(serde_json::json!({ "ok": true, "result": { "message_id": 1 } }))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{}", addr)
}
