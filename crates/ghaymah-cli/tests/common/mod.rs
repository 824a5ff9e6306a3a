#![allow(dead_code)]
//! In-process mock of the Ghaymah control plane for end-to-end tests.

use std::{collections::{BTreeMap, HashMap}, net::SocketAddr, sync::{Arc, Mutex}};
use axum::{Router, Json, routing::{get, delete}, extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Response}};
use serde_json::{json, Value};

pub const MOCK_TOKEN: &str = "test-token-123";

#[derive(Clone, Default)]
pub struct MockState {
    pub deployments: Arc<Mutex<Vec<Value>>>,
    pub registries: Arc<Mutex<BTreeMap<String, String>>>,
    pub tokens: Arc<Mutex<Vec<Value>>>,
    pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct MockApi { pub addr: SocketAddr, pub state: MockState }

impl MockApi {
    pub fn url(&self) -> String { format!("http://{}", self.addr) }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()).and_then(|v| v.strip_prefix("Bearer ")) == Some(MOCK_TOKEN)
}

fn unauthorized() -> Response { (StatusCode::UNAUTHORIZED, "Invalid token").into_response() }

async fn deploy(State(st): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    if body.get("name").and_then(Value::as_str).unwrap_or("").is_empty() { return (StatusCode::BAD_REQUEST, "name is required").into_response(); }
    st.deployments.lock().unwrap().push(body);
    Json(json!({"appId":"deploy-1","status":"deploying"})).into_response()
}

async fn status(State(st): State<MockState>, headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let Some(name) = q.get("name").cloned() else { return (StatusCode::BAD_REQUEST, "Name parameter is required").into_response(); };
    st.queries.lock().unwrap().push(q);
    if name == "missing" { return (StatusCode::NOT_FOUND, "application not found").into_response(); }
    Json(json!({
        "state": "running",
        "lastDeployment": "2024-01-23T10:15:00Z",
        "resources": {"cpuUsage": 25.0, "memoryUsage": 12.5, "storageUsage": 3.0}
    })).into_response()
}

async fn logs(State(st): State<MockState>, headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let entries = vec![
        json!({"timestamp":"2024-01-23T10:00:00Z","message":"booting"}),
        json!({"timestamp":"2024-01-23T10:00:01Z","message":"listening on :8080"}),
        json!({"timestamp":"2024-01-23T10:00:02Z","message":"GET /health 200"}),
    ];
    let tail = q.get("tail").and_then(|t| t.parse::<usize>().ok()).unwrap_or(entries.len());
    st.queries.lock().unwrap().push(q);
    let kept = entries[entries.len().saturating_sub(tail)..].to_vec();
    Json(json!({"entries": kept})).into_response()
}

async fn put_registry(State(st): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let url = body["registryUrl"].as_str().unwrap_or_default().to_string();
    let user = body["username"].as_str().unwrap_or_default().to_string();
    st.registries.lock().unwrap().insert(url.clone(), user.clone());
    Json(json!({"registryUrl": url, "username": user})).into_response()
}

async fn list_registries(State(st): State<MockState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let regs: Vec<Value> = st.registries.lock().unwrap().iter().map(|(u, n)| json!({"registryUrl": u, "username": n})).collect();
    Json(json!({"registries": regs})).into_response()
}

async fn remove_registry(State(st): State<MockState>, headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let url = q.get("url").cloned().unwrap_or_default();
    match st.registries.lock().unwrap().remove(&url) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::NOT_FOUND, format!("registry {url} not found")).into_response(),
    }
}

async fn create_token(State(st): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    st.tokens.lock().unwrap().push(body);
    StatusCode::CREATED.into_response()
}

async fn list_tokens(State(st): State<MockState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let tokens = st.tokens.lock().unwrap().clone();
    Json(json!({"tokens": tokens})).into_response()
}

async fn revoke_token(State(st): State<MockState>, headers: HeaderMap, Path(value): Path<String>) -> Response {
    if !authorized(&headers) { return unauthorized(); }
    let mut tokens = st.tokens.lock().unwrap();
    let before = tokens.len();
    tokens.retain(|t| t["value"].as_str() != Some(value.as_str()));
    if tokens.len() == before { return (StatusCode::NOT_FOUND, "token not found").into_response(); }
    StatusCode::NO_CONTENT.into_response()
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/apps", axum::routing::post(deploy))
        .route("/apps/status", get(status))
        .route("/apps/logs", get(logs))
        .route("/registries", get(list_registries).put(put_registry).delete(remove_registry))
        .route("/tokens", get(list_tokens).post(create_token))
        .route("/tokens/:value", delete(revoke_token))
        .with_state(state)
}

/// Serves the mock on an ephemeral port from its own thread and runtime, so both
/// blocking (`assert_cmd`) and async tests can use it.
pub fn spawn() -> MockApi {
    let state = MockState::default();
    let served = state.clone();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, router(served)).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    MockApi { addr, state }
}

/// An address nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
