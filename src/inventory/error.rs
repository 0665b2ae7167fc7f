use crate::sequence::SequenceError;
use crate::store::StoreError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Inventory item not found")]
    NotFound { item_id: u64 },

    #[error("Failed to assign itemId: {0}")]
    IdAssignment(#[from] SequenceError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}
