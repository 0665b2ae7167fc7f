//! Common test utilities

use async_trait::async_trait;
use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use inventory_daemon::{
    build_router, AppState, FileSequenceStore, SequenceError, SequenceStore, ITEM_ID_SEQUENCE,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Open a file-backed sequence store under `data_dir/counters`.
#[allow(dead_code)] // Test utility for integration tests
pub async fn open_sequences(data_dir: &Path) -> FileSequenceStore {
    FileSequenceStore::open(data_dir.join("counters"))
        .await
        .expect("Failed to open sequence store")
}

/// Write a counter document directly, as if `value` had already been issued.
#[allow(dead_code)] // Test utility for integration tests
pub fn seed_item_id_counter(data_dir: &Path, value: u64) {
    let counters = data_dir.join("counters");
    std::fs::create_dir_all(&counters).expect("Failed to create counters dir");
    let doc = serde_json::json!({ "name": ITEM_ID_SEQUENCE, "value": value });
    std::fs::write(
        counters.join(format!("{ITEM_ID_SEQUENCE}.json")),
        doc.to_string(),
    )
    .expect("Failed to seed counter");
}

/// A sequence store whose backend is always down.
#[allow(dead_code)] // Test utility for integration tests
pub struct UnavailableSequenceStore;

#[async_trait]
impl SequenceStore for UnavailableSequenceStore {
    async fn next_value(&self, _name: &str) -> Result<u64, SequenceError> {
        Err(SequenceError::unavailable("connection refused"))
    }

    async fn current_value(&self, _name: &str) -> Result<Option<u64>, SequenceError> {
        Err(SequenceError::unavailable("connection refused"))
    }
}

/// Build the API router over a data directory with the given sequence store.
#[allow(dead_code)] // Test utility for integration tests
pub async fn open_app_with(data_dir: &Path, sequences: Arc<dyn SequenceStore>) -> Router {
    let state = AppState::open(data_dir, sequences)
        .await
        .expect("Failed to open app state");
    build_router(state)
}

/// Build the API router over a data directory with file-backed counters.
#[allow(dead_code)] // Test utility for integration tests
pub async fn open_app(data_dir: &Path) -> Router {
    let sequences = open_sequences(data_dir).await;
    open_app_with(data_dir, Arc::new(sequences)).await
}

/// Send one request through the router and decode the JSON response.
#[allow(dead_code)] // Test utility for integration tests
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router never fails");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, json)
}
