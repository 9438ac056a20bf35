//! Common test utilities

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use eventos_api::{build_app, AppState, EventStore};
use serde_json::Value;
use tower::util::ServiceExt;

/// App over a store holding the two demo events, plus a handle to the store
pub fn seeded_app() -> (Router, EventStore) {
    let store = EventStore::seeded();
    (build_app(AppState::new(store.clone())), store)
}

/// Send a request and decode the JSON response body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Ids of the events in a `data.events` array
pub fn event_ids(body: &Value) -> Vec<u64> {
    body["data"]["events"]
        .as_array()
        .map(|events| events.iter().filter_map(|e| e["id"].as_u64()).collect())
        .unwrap_or_default()
}
