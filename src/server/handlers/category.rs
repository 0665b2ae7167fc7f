use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use super::parse_path_id;
use crate::category::{Category, CreateCategoryRequest};
use crate::server::structured_error::ApiError;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryMessage {
    pub message: &'static str,
    pub category: Category,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.list().await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let category_id = parse_path_id("categoryId", &category_id)?;
    Ok(Json(state.categories.get(category_id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Json(request) = body?;
    let category = state.categories.create(request).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<CategoryMessage>, ApiError> {
    let category_id = parse_path_id("categoryId", &category_id)?;
    let category = state.categories.delete(category_id).await?;
    Ok(Json(CategoryMessage {
        message: "Category deleted",
        category,
    }))
}
