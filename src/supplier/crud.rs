//! Supplier CRUD operations.

use super::types::{CreateSupplierRequest, Supplier, SupplierDeletion, SupplierError};
use crate::store::{Collection, StoreError};
use chrono::Utc;
use std::path::Path;
use tracing::info;

pub struct Suppliers {
    suppliers: Collection<Supplier>,
}

impl Suppliers {
    pub async fn open(root: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            suppliers: Collection::open(root).await?,
        })
    }

    pub async fn list(&self) -> Result<Vec<Supplier>, SupplierError> {
        Ok(self.suppliers.list().await?)
    }

    /// Create a supplier
    pub async fn create(&self, request: CreateSupplierRequest) -> Result<Supplier, SupplierError> {
        let supplier = request.into_supplier(Utc::now())?;
        self.suppliers.insert(&supplier).await?;
        info!(
            supplier_id = supplier.supplier_id,
            name = %supplier.supplier_name,
            "Created supplier"
        );
        Ok(supplier)
    }

    /// Delete a supplier by `supplierId`, or by `_id` when one is given.
    ///
    /// Without `_id`, a `supplierId` shared by several suppliers deletes
    /// nothing and returns the candidates so the caller can pick one.
    pub async fn delete(
        &self,
        supplier_id: u64,
        document_id: Option<&str>,
    ) -> Result<SupplierDeletion, SupplierError> {
        let _guard = self.suppliers.lock().await;

        if let Some(id) = document_id {
            let deleted = self
                .suppliers
                .remove(id)
                .await?
                .ok_or_else(|| SupplierError::NotFoundById(id.to_string()))?;
            info!(supplier_id = deleted.supplier_id, id, "Deleted supplier by _id");
            return Ok(SupplierDeletion::Deleted(deleted));
        }

        let mut matches = self
            .suppliers
            .find(|s| s.supplier_id == supplier_id)
            .await?;
        match matches.len() {
            0 => Err(SupplierError::NotFound { supplier_id }),
            1 => {
                let only = matches.remove(0);
                let deleted = self
                    .suppliers
                    .remove(&only.id)
                    .await?
                    .ok_or(SupplierError::NotFound { supplier_id })?;
                info!(supplier_id, "Deleted supplier");
                Ok(SupplierDeletion::Deleted(deleted))
            }
            _ => Ok(SupplierDeletion::Ambiguous(matches)),
        }
    }
}
