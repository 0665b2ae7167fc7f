use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::category::CategoryError;
use crate::inventory::InventoryError;
use crate::server::error_mapping::ToStructuredError;
use crate::supplier::SupplierError;

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl StructuredError {
    #[must_use]
    pub fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            tip: None,
        }
    }

    #[must_use]
    pub fn with_tip(mut self, tip: &str) -> Self {
        self.tip = Some(tip.to_string());
        self
    }
}

/// An error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: StructuredError,
}

impl ApiError {
    /// Convert a domain error into a response, logging server-side failures.
    #[must_use]
    pub fn from_domain<E: ToStructuredError + Display>(err: &E) -> Self {
        let status = err.http_status();
        let (code, tip) = err.error_code_and_tip();
        if status.is_server_error() {
            error!(code, status = status.as_u16(), "Request failed: {err}");
        }
        let mut body = StructuredError::new(code, err.to_string());
        if let Some(tip) = tip {
            body = body.with_tip(tip);
        }
        Self { status, body }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: StructuredError::new("BAD_REQUEST", message.into()),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> &StructuredError {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        Self::from_domain(&err)
    }
}

impl From<SupplierError> for ApiError {
    fn from(err: SupplierError) -> Self {
        Self::from_domain(&err)
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        Self::from_domain(&err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
