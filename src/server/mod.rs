//! REST surface of the daemon.

pub mod error_mapping;
pub mod handlers;
pub mod structured_error;

pub use error_mapping::ToStructuredError;
pub use structured_error::{ApiError, StructuredError};

use crate::category::Categories;
use crate::inventory::Inventory;
use crate::sequence::SequenceStore;
use crate::store::StoreError;
use crate::supplier::Suppliers;
use axum::routing::{delete, get};
use axum::Router;
use handlers::{category, health, inventory, supplier};
use std::path::Path;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
    pub suppliers: Arc<Suppliers>,
    pub categories: Arc<Categories>,
}

impl AppState {
    /// Open every collection under `data_dir`.
    pub async fn open(
        data_dir: &Path,
        sequences: Arc<dyn SequenceStore>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            inventory: Arc::new(Inventory::open(data_dir, sequences).await?),
            suppliers: Arc::new(Suppliers::open(data_dir).await?),
            categories: Arc::new(Categories::open(data_dir).await?),
        })
    }
}

/// Build the API router. Middleware (CORS, request logging) is added by the caller.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/api/inventory",
            get(inventory::list_items).post(inventory::create_item),
        )
        .route(
            "/api/inventory/:item_id",
            get(inventory::get_item)
                .patch(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .route(
            "/api/supplier",
            get(supplier::list_suppliers).post(supplier::create_supplier),
        )
        .route("/api/supplier/:supplier_id", delete(supplier::delete_supplier))
        .route(
            "/api/category",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/category/:category_id",
            get(category::get_category).delete(category::delete_category),
        )
        .with_state(state)
}
