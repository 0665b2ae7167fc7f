use crate::store::{new_document_id, Document, StoreError};
use crate::validation::{nonblank, positive_id, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CATEGORY_REQUIRED_FIELDS: &str = "categoryId and categoryName are required";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub category_id: u64,
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl Document for Category {
    const COLLECTION: &'static str = "categories";

    fn document_id(&self) -> &str {
        &self.id
    }

    fn date_created(&self) -> DateTime<Utc> {
        self.date_created
    }
}

/// Body of `POST /api/category`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn into_category(self, now: DateTime<Utc>) -> Result<Category, ValidationError> {
        let (Some(category_id), Some(category_name)) =
            (self.category_id, nonblank(self.category_name))
        else {
            return Err(ValidationError::custom(CATEGORY_REQUIRED_FIELDS));
        };
        Ok(Category {
            id: new_document_id(),
            category_id: positive_id("categoryId", category_id)?,
            category_name,
            description: nonblank(self.description),
            date_created: now,
            date_modified: None,
        })
    }
}

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("Category not found")]
    NotFound { category_id: u64 },

    #[error("Category {0} already exists")]
    AlreadyExists(u64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}
