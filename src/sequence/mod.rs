//! Named sequence counters that mint unique, strictly increasing integers.
//!
//! Every counter is an explicit persisted entity keyed by name. The only way
//! to advance a counter is [`SequenceStore::next_value`], which each backend
//! implements as a single atomic read-modify-write in the store itself.

mod error;
mod file;
mod memory;

pub use error::SequenceError;
pub use file::FileSequenceStore;
pub use memory::MemorySequenceStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Counter used to mint inventory `itemId` values.
pub const ITEM_ID_SEQUENCE: &str = "itemId";

/// A durable source of sequence values.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Atomically increment the counter `name` and return the new value.
    ///
    /// Unknown counters start at 0, so the first value issued is 1. The value
    /// is committed before it is returned.
    async fn next_value(&self, name: &str) -> Result<u64, SequenceError>;

    /// Last committed value of `name`, or `None` if it was never advanced.
    async fn current_value(&self, name: &str) -> Result<Option<u64>, SequenceError>;
}

/// Persisted state of one named counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceCounter {
    pub name: String,
    pub value: u64,
}

impl SequenceCounter {
    /// A counter that has not issued any value yet.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: 0,
        }
    }

    /// The counter after one increment.
    pub fn advanced(&self) -> Result<Self, SequenceError> {
        let value = self
            .value
            .checked_add(1)
            .ok_or_else(|| SequenceError::SequenceExhausted {
                name: self.name.clone(),
                value: self.value,
            })?;
        Ok(Self {
            name: self.name.clone(),
            value,
        })
    }
}

/// Check that `name` is usable as a counter key.
///
/// Names double as file names in the file-backed store, so only ASCII
/// alphanumerics, `-` and `_` are accepted.
pub fn validate_sequence_name(name: &str) -> Result<(), SequenceError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SequenceError::InvalidName(name.to_string()))
    }
}
