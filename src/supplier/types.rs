//! Supplier type definitions and error types.

use crate::store::{new_document_id, Document, StoreError};
use crate::validation::{nonblank, positive_id, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned when a create request lacks a required field.
pub const SUPPLIER_REQUIRED_FIELDS: &str = "supplierId, supplierName, and address are required";

/// A supplier. `supplierId` is chosen by the client and may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: String,
    pub supplier_id: u64,
    pub supplier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<String>,
    pub address: String,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl Document for Supplier {
    const COLLECTION: &'static str = "suppliers";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Body of `POST /api/supplier`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierRequest {
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub contact_information: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CreateSupplierRequest {
    /// Validate the request and build the supplier it describes.
    pub fn into_supplier(self, now: DateTime<Utc>) -> Result<Supplier, ValidationError> {
        // A zero supplierId counts as missing
        let (Some(supplier_id), Some(supplier_name), Some(address)) = (
            self.supplier_id.filter(|id| *id != 0),
            nonblank(self.supplier_name),
            nonblank(self.address),
        ) else {
            return Err(ValidationError::custom(SUPPLIER_REQUIRED_FIELDS));
        };
        Ok(Supplier {
            id: new_document_id(),
            supplier_id: positive_id("supplierId", supplier_id)?,
            supplier_name,
            contact_information: nonblank(self.contact_information),
            address,
            date_created: now,
            date_modified: Some(now),
        })
    }
}

/// Optional body of `DELETE /api/supplier/{supplierId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteSupplierRequest {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
}

/// Outcome of a supplier delete.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplierDeletion {
    Deleted(Supplier),
    /// Several suppliers share the id; nothing was deleted.
    Ambiguous(Vec<Supplier>),
}

/// Supplier-related errors
#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("Supplier not found")]
    NotFound { supplier_id: u64 },

    #[error("Supplier not found by _id")]
    NotFoundById(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}
