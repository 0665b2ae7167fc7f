use crate::store::{new_document_id, Document};
use crate::validation::{
    check_min_length, non_negative_integer, non_negative_number, nonblank, positive_id,
    require_min_length, ValidationError, MIN_NAME_LENGTH,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Internal document id; not the business key.
    #[serde(rename = "_id")]
    pub id: String,
    /// Server-assigned sequential id, immutable once set.
    pub item_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl Document for InventoryItem {
    const COLLECTION: &'static str = "inventory";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Validated fields of an item that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryItem {
    pub supplier_id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
}

impl NewInventoryItem {
    /// Build the persisted record once an `itemId` has been issued.
    #[must_use]
    pub fn into_item(self, item_id: u64, created: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id: new_document_id(),
            item_id,
            supplier_id: self.supplier_id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
            date_created: created,
            date_modified: None,
        }
    }
}

/// Body of `POST /api/inventory`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    /// Accepted for compatibility and ignored; ids are always server-assigned.
    #[serde(default)]
    pub item_id: Option<serde_json::Value>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl CreateInventoryRequest {
    pub fn validate(self) -> Result<NewInventoryItem, ValidationError> {
        let name = require_min_length("name", self.name, MIN_NAME_LENGTH)?;
        Ok(NewInventoryItem {
            supplier_id: self
                .supplier_id
                .map(|id| positive_id("supplierId", id))
                .transpose()?,
            name,
            description: nonblank(self.description),
            quantity: self
                .quantity
                .map(|q| non_negative_integer("quantity", q))
                .transpose()?,
            price: self
                .price
                .map(|p| non_negative_number("price", p))
                .transpose()?,
        })
    }
}

/// Body of `PATCH /api/inventory/{itemId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    /// Ignored: `itemId` never changes after creation.
    #[serde(default)]
    pub item_id: Option<serde_json::Value>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl UpdateInventoryRequest {
    pub fn validate(self) -> Result<InventoryPatch, ValidationError> {
        if let Some(name) = &self.name {
            check_min_length("name", name, MIN_NAME_LENGTH)?;
        }
        let patch = InventoryPatch {
            supplier_id: self
                .supplier_id
                .map(|id| positive_id("supplierId", id))
                .transpose()?,
            name: self.name,
            description: self.description,
            quantity: self
                .quantity
                .map(|q| non_negative_integer("quantity", q))
                .transpose()?,
            price: self
                .price
                .map(|p| non_negative_number("price", p))
                .transpose()?,
        };
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(patch)
    }
}

/// Validated field changes for an existing item. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryPatch {
    pub supplier_id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
}

impl InventoryPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supplier_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }

    /// Copy the changed fields onto `item`. Never touches `itemId` or dates.
    pub fn apply_to(self, item: &mut InventoryItem) {
        if let Some(supplier_id) = self.supplier_id {
            item.supplier_id = Some(supplier_id);
        }
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(quantity) = self.quantity {
            item.quantity = Some(quantity);
        }
        if let Some(price) = self.price {
            item.price = Some(price);
        }
    }
}
