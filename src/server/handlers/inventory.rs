use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use super::parse_path_id;
use crate::inventory::{
    CreateInventoryRequest, InventoryError, InventoryItem, UpdateInventoryRequest,
};
use crate::server::structured_error::ApiError;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct InventoryItemMessage {
    pub message: &'static str,
    pub item: InventoryItem,
}

pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(state.inventory.list().await?))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<InventoryItem>, ApiError> {
    let item_id = parse_path_id("itemId", &item_id)?;
    Ok(Json(state.inventory.get_by_item_id(item_id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<CreateInventoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let Json(request) = body?;
    let new_item = request.validate().map_err(InventoryError::from)?;
    let item = state.inventory.create_inventory_record(new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    body: Result<Json<UpdateInventoryRequest>, JsonRejection>,
) -> Result<Json<InventoryItemMessage>, ApiError> {
    let item_id = parse_path_id("itemId", &item_id)?;
    let Json(request) = body?;
    let patch = request.validate().map_err(InventoryError::from)?;
    let item = state
        .inventory
        .update_inventory_record(item_id, patch)
        .await?;
    Ok(Json(InventoryItemMessage {
        message: "Inventory updated item successfully!",
        item,
    }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<InventoryItemMessage>, ApiError> {
    let item_id = parse_path_id("itemId", &item_id)?;
    let item = state.inventory.delete_by_item_id(item_id).await?;
    Ok(Json(InventoryItemMessage {
        message: "Inventory item deleted",
        item,
    }))
}
