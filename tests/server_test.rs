#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, open_app, open_app_with, send, UnavailableSequenceStore};
use http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_healthz() {
    let temp_dir = create_test_dir();
    let app = open_app(temp_dir.path()).await;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_inventory_lifecycle() {
    let temp_dir = create_test_dir();
    let app = open_app(temp_dir.path()).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({
            "itemId": 999,
            "supplierId": 1,
            "name": "Widget",
            "description": "A useful widget",
            "quantity": 100,
            "price": 9.99
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["itemId"], 1);
    assert!(created["_id"].is_string());
    assert!(created["dateCreated"].is_string());
    assert!(created.get("dateModified").is_none());

    let (status, fetched) = send(&app, Method::GET, "/api/inventory/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/api/inventory/1",
        Some(json!({ "itemId": 55, "name": "Updated Gadget", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Inventory updated item successfully!");
    assert_eq!(updated["item"]["itemId"], 1);
    assert_eq!(updated["item"]["name"], "Updated Gadget");
    assert!(updated["item"]["dateModified"].is_string());

    let (status, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, deleted) = send(&app, Method::DELETE, "/api/inventory/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Inventory item deleted");
    assert_eq!(deleted["item"]["itemId"], 1);

    let (status, body) = send(&app, Method::GET, "/api/inventory/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");
    assert_eq!(body["message"], "Inventory item not found");
}

#[tokio::test]
async fn test_inventory_validation_errors() {
    let temp_dir = create_test_dir();
    let app = open_app(temp_dir.path()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "name": "UG", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "name: Must not have fewer than 3 characters.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "name": "Widget", "price": -1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/api/inventory/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/inventory/1",
        Some(json!({ "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ITEM_NOT_FOUND");

    let (status, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let temp_dir = create_test_dir();
    let app = open_app(temp_dir.path()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "name": 12 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_sequence_store_outage_is_503_and_writes_nothing() {
    let temp_dir = create_test_dir();
    let app = open_app_with(temp_dir.path(), Arc::new(UnavailableSequenceStore)).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/inventory",
        Some(json!({ "name": "Widget" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert!(body["tip"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_category_routes() {
    let temp_dir = create_test_dir();
    let app = open_app(temp_dir.path()).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "categoryId": 5, "categoryName": "Tools" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["categoryId"], 5);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "categoryId": 5, "categoryName": "Hardware" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_EXISTS");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "categoryName": "Hardware" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "categoryId and categoryName are required");

    let (status, fetched) = send(&app, Method::GET, "/api/category/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, deleted) = send(&app, Method::DELETE, "/api/category/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["category"]["categoryId"], 5);

    let (status, _) = send(&app, Method::GET, "/api/category/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
