//! In-memory sequence counters.
//!
//! Atomic within a single process only; nothing survives a restart. Do not
//! use it where several daemon instances share one data directory.

use super::{validate_sequence_name, SequenceCounter, SequenceError, SequenceStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemorySequenceStore {
    counters: Mutex<HashMap<String, u64>>,
}

impl MemorySequenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counter `name` at `value` instead of 0.
    #[must_use]
    pub fn seeded(mut self, name: &str, value: u64) -> Self {
        self.counters.get_mut().insert(name.to_string(), value);
        self
    }
}

#[async_trait]
impl SequenceStore for MemorySequenceStore {
    async fn next_value(&self, name: &str) -> Result<u64, SequenceError> {
        validate_sequence_name(name)?;
        let mut counters = self.counters.lock().await;
        let current = SequenceCounter {
            name: name.to_string(),
            value: counters.get(name).copied().unwrap_or(0),
        };
        let next = current.advanced()?;
        counters.insert(next.name, next.value);
        Ok(next.value)
    }

    async fn current_value(&self, name: &str) -> Result<Option<u64>, SequenceError> {
        validate_sequence_name(name)?;
        Ok(self.counters.lock().await.get(name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::ITEM_ID_SEQUENCE;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_store_increments() {
        let store = MemorySequenceStore::new();
        assert_eq!(store.next_value(ITEM_ID_SEQUENCE).await.unwrap(), 1);
        assert_eq!(store.next_value(ITEM_ID_SEQUENCE).await.unwrap(), 2);
        assert_eq!(store.current_value(ITEM_ID_SEQUENCE).await.unwrap(), Some(2));
        assert_eq!(store.current_value("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seeded_store_continues_from_seed() {
        let store = MemorySequenceStore::new().seeded(ITEM_ID_SEQUENCE, 41);
        assert_eq!(store.next_value(ITEM_ID_SEQUENCE).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_exhaustion_leaves_value_unchanged() {
        let store = MemorySequenceStore::new().seeded(ITEM_ID_SEQUENCE, u64::MAX);
        let err = store.next_value(ITEM_ID_SEQUENCE).await.unwrap_err();
        assert!(matches!(err, SequenceError::SequenceExhausted { .. }));
        assert_eq!(
            store.current_value(ITEM_ID_SEQUENCE).await.unwrap(),
            Some(u64::MAX)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_unique() {
        let store = Arc::new(MemorySequenceStore::new());
        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.next_value(ITEM_ID_SEQUENCE).await.unwrap() })
            })
            .collect();

        let mut values = Vec::new();
        for handle in handles {
            values.push(handle.await.unwrap());
        }
        values.sort_unstable();
        assert_eq!(values, (1..=64).collect::<Vec<u64>>());
    }
}
