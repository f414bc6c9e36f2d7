//! In-process stub of the monitoring backend for gateway and view tests.
//!
//! The stub serves caller-supplied axum routes under `/api` on an ephemeral
//! localhost port and records every request it receives as
//! `"{METHOD} {path}?{query}"`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::gateway::Gateway;

type Hits = Arc<Mutex<Vec<String>>>;

pub struct StubBackend {
    pub base_url: String,
    hits: Hits,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub async fn spawn(routes: Router) -> Self {
        let hits: Hits = Arc::default();
        let app = Router::new()
            .nest("/api", routes)
            .layer(middleware::from_fn_with_state(hits.clone(), record_hit));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend failed");
        });

        Self { base_url: format!("http://{addr}/api"), hits, task }
    }

    /// Stub answering every endpoint with canned telemetry.
    pub async fn healthy() -> Self {
        Self::spawn(healthy_routes()).await
    }

    pub fn gateway(&self) -> Gateway {
        self.gateway_with_timeout(Duration::from_secs(2))
    }

    pub fn gateway_with_timeout(&self, timeout: Duration) -> Gateway {
        Gateway::configure(&self.base_url, timeout).expect("stub gateway config")
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hits mutex should lock").clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn record_hit(State(hits): State<Hits>, req: Request, next: Next) -> Response {
    let target = req.uri().path_and_query().map_or_else(|| req.uri().path().to_owned(), ToString::to_string);
    hits.lock().expect("hits mutex should lock").push(format!("{} {target}", req.method()));
    next.run(req).await
}

/// A base address nothing is listening on.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/api")
}

/// `n` alerts, newest first, the way the backend orders them.
pub fn sample_alerts(n: u64) -> Value {
    let alerts: Vec<Value> = (1..=n)
        .rev()
        .map(|id| {
            json!({
                "id": id,
                "timestamp": format!("2026-10-14T12:00:{:02}Z", id % 60),
                "source_ip": format!("10.0.0.{id}"),
                "dest_ip": "192.168.1.10",
                "type": if id % 2 == 0 { "PortScan" } else { "DDoS" },
                "confidence": 0.9,
                "is_read": false,
                "payload": "",
            })
        })
        .collect();
    Value::Array(alerts)
}

pub fn sample_status() -> Value {
    json!({
        "status": "running",
        "uptime_str": "1h0m0s",
        "uptime_sec": 3600.0,
        "traffic_in": 12.5,
        "traffic_out": 3.25,
        "active_flows": 42,
        "flow_list": [
            { "src_port": 51514, "dst_port": 443, "protocol": "TCP", "duration": "12s" }
        ],
    })
}

pub fn sample_engine_status() -> Value {
    json!({
        "model_path": "models/ids.onnx",
        "scaler_path": "models/scaler.json",
        "current_threshold": 0.8,
        "suspicious_threshold": 0.5,
    })
}

async fn alerts_handler(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(50);
    Json(sample_alerts(limit))
}

/// Working `/alerts` plus a `/status` that answers only after `delay`.
pub fn routes_with_slow_status(delay: Duration) -> Router {
    Router::new().route("/alerts", get(alerts_handler)).route(
        "/status",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(sample_status())
        }),
    )
}

pub fn healthy_routes() -> Router {
    Router::new()
        .route("/alerts", get(alerts_handler))
        .route("/status", get(|| async { Json(sample_status()) }))
        .route(
            "/stats/threats",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let range = params.get("range").cloned().unwrap_or_default();
                Json(json!([
                    { "label": format!("{range}-1"), "count": 3 },
                    { "label": format!("{range}-2"), "count": 0 },
                ]))
            }),
        )
        .route("/engine/status", get(|| async { Json(sample_engine_status()) }))
        .route(
            "/engine/config",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "message": "saved", "threshold": body["threshold"] }))
            }),
        )
}
