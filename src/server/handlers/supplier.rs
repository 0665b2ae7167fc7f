use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use super::parse_path_id;
use crate::server::structured_error::ApiError;
use crate::server::AppState;
use crate::supplier::{CreateSupplierRequest, DeleteSupplierRequest, Supplier, SupplierDeletion};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DeleteSupplierResponse {
    Deleted {
        message: &'static str,
        supplier: Supplier,
    },
    Ambiguous {
        message: &'static str,
        suppliers: Vec<Supplier>,
    },
}

pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    Ok(Json(state.suppliers.list().await?))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    body: Result<Json<CreateSupplierRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    let Json(request) = body?;
    let supplier = state.suppliers.create(request).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// `DELETE /api/supplier/{supplierId}` with an optional `{ "_id": ... }` body.
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
    body: Bytes,
) -> Result<Json<DeleteSupplierResponse>, ApiError> {
    let supplier_id = parse_path_id("supplierId", &supplier_id)?;
    let request = parse_delete_body(&body)?;
    let response = match state
        .suppliers
        .delete(supplier_id, request.id.as_deref())
        .await?
    {
        SupplierDeletion::Deleted(supplier) => DeleteSupplierResponse::Deleted {
            message: "Supplier deleted",
            supplier,
        },
        SupplierDeletion::Ambiguous(suppliers) => DeleteSupplierResponse::Ambiguous {
            message: "Multiple suppliers found",
            suppliers,
        },
    };
    Ok(Json(response))
}

/// An empty body means "no `_id`"; anything else must be JSON.
fn parse_delete_body(body: &[u8]) -> Result<DeleteSupplierRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DeleteSupplierRequest::default());
    }
    let request: DeleteSupplierRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;
    Ok(DeleteSupplierRequest {
        id: request.id.filter(|id| !id.trim().is_empty()),
    })
}
