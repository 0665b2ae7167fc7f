//! Category CRUD operations.

use super::types::{Category, CategoryError, CreateCategoryRequest};
use crate::store::{Collection, StoreError};
use chrono::Utc;
use std::path::Path;
use tracing::info;

pub struct Categories {
    categories: Collection<Category>,
}

impl Categories {
    pub async fn open(root: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            categories: Collection::open(root).await?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.categories.list().await?)
    }

    pub async fn get(&self, category_id: u64) -> Result<Category, CategoryError> {
        self.categories
            .find_one(|c| c.category_id == category_id)
            .await?
            .ok_or(CategoryError::NotFound { category_id })
    }

    /// Create a category. `categoryId` must not be taken.
    pub async fn create(&self, request: CreateCategoryRequest) -> Result<Category, CategoryError> {
        let category = request.into_category(Utc::now())?;
        let _guard = self.categories.lock().await;
        let taken = self
            .categories
            .find_one(|c| c.category_id == category.category_id)
            .await?
            .is_some();
        if taken {
            return Err(CategoryError::AlreadyExists(category.category_id));
        }
        self.categories.insert(&category).await?;
        info!(
            category_id = category.category_id,
            name = %category.category_name,
            "Created category"
        );
        Ok(category)
    }

    pub async fn delete(&self, category_id: u64) -> Result<Category, CategoryError> {
        let _guard = self.categories.lock().await;
        let category = self.get(category_id).await?;
        let deleted = self
            .categories
            .remove(&category.id)
            .await?
            .ok_or(CategoryError::NotFound { category_id })?;
        info!(category_id, "Deleted category");
        Ok(deleted)
    }
}
