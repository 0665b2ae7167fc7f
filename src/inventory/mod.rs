//! Inventory records.
//!
//! Every write goes through the [`IdAssignmentHook`] before it reaches the
//! collection: creations get their `itemId` from the `"itemId"` sequence,
//! updates get a fresh `dateModified`.

mod error;
mod hook;
mod types;

pub use error::InventoryError;
pub use hook::{IdAssignmentHook, PendingWrite, ReadyWrite, WriteIntent};
pub use types::{
    CreateInventoryRequest, InventoryItem, InventoryPatch, NewInventoryItem,
    UpdateInventoryRequest,
};

use crate::sequence::SequenceStore;
use crate::store::{Collection, StoreError};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub struct Inventory {
    items: Collection<InventoryItem>,
    hook: IdAssignmentHook,
}

impl Inventory {
    /// Open the inventory collection under `root`.
    pub async fn open(
        root: &Path,
        sequences: Arc<dyn SequenceStore>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            items: Collection::open(root).await?,
            hook: IdAssignmentHook::new(sequences),
        })
    }

    /// Create a record. The result always carries a server-assigned `itemId`.
    ///
    /// If the sequence store fails nothing is written. If the write fails
    /// after an id was issued, that id is consumed and never reused.
    pub async fn create_inventory_record(
        &self,
        new_item: NewInventoryItem,
    ) -> Result<InventoryItem, InventoryError> {
        let ready = self.hook.apply(PendingWrite::Create(new_item)).await?;
        let item = self.commit(ready).await?;
        info!(item_id = item.item_id, name = %item.name, "Created inventory item");
        Ok(item)
    }

    pub async fn list(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        Ok(self.items.list().await?)
    }

    pub async fn get_by_item_id(&self, item_id: u64) -> Result<InventoryItem, InventoryError> {
        self.items
            .find_one(|item| item.item_id == item_id)
            .await?
            .ok_or(InventoryError::NotFound { item_id })
    }

    /// Apply `patch` to the record with `item_id`. `itemId` itself never changes.
    pub async fn update_inventory_record(
        &self,
        item_id: u64,
        patch: InventoryPatch,
    ) -> Result<InventoryItem, InventoryError> {
        let _guard = self.items.lock().await;
        let mut item = self.get_by_item_id(item_id).await?;
        patch.apply_to(&mut item);
        let ready = self.hook.apply(PendingWrite::Update(item)).await?;
        let item = self.commit(ready).await?;
        info!(item_id, "Updated inventory item");
        Ok(item)
    }

    pub async fn delete_by_item_id(&self, item_id: u64) -> Result<InventoryItem, InventoryError> {
        let _guard = self.items.lock().await;
        let item = self.get_by_item_id(item_id).await?;
        let removed = self
            .items
            .remove(&item.id)
            .await?
            .ok_or(InventoryError::NotFound { item_id })?;
        info!(item_id, "Deleted inventory item");
        Ok(removed)
    }

    async fn commit(&self, ready: ReadyWrite) -> Result<InventoryItem, InventoryError> {
        let result = match ready.intent() {
            WriteIntent::Create => self.items.insert(ready.item()).await,
            WriteIntent::Update => self.items.replace(ready.item()).await,
        };
        if let Err(e) = result {
            error!(item_id = ready.item().item_id, "Failed to write inventory item: {e}");
            return Err(e.into());
        }
        Ok(ready.into_item())
    }
}
