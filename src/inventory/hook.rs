//! ID assignment hook run before an inventory record is committed.
//!
//! A write attempt starts as a [`PendingWrite`] whose intent is explicit.
//! [`IdAssignmentHook::apply`] consumes it and either yields a [`ReadyWrite`]
//! or fails, so the hook cannot run twice for the same attempt and a record
//! cannot reach the store without passing through it:
//!
//! - creation: one `nextValue("itemId")` call, the value becomes `itemId`
//! - update: `dateModified` is stamped, `itemId` is left alone
//! - sequence failure: the attempt ends here and nothing is written

use super::types::{InventoryItem, NewInventoryItem};
use crate::sequence::{SequenceError, SequenceStore, ITEM_ID_SEQUENCE};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteIntent {
    Create,
    Update,
}

/// A record on its way to the store, before the hook has run.
#[derive(Debug, Clone)]
pub enum PendingWrite {
    Create(NewInventoryItem),
    Update(InventoryItem),
}

impl PendingWrite {
    #[must_use]
    pub fn intent(&self) -> WriteIntent {
        match self {
            PendingWrite::Create(_) => WriteIntent::Create,
            PendingWrite::Update(_) => WriteIntent::Update,
        }
    }
}

/// A record the hook has finished with; only the hook can build one.
#[derive(Debug, Clone)]
pub struct ReadyWrite {
    item: InventoryItem,
    intent: WriteIntent,
}

impl ReadyWrite {
    #[must_use]
    pub fn item(&self) -> &InventoryItem {
        &self.item
    }

    #[must_use]
    pub fn intent(&self) -> WriteIntent {
        self.intent
    }

    #[must_use]
    pub fn into_item(self) -> InventoryItem {
        self.item
    }
}

#[derive(Clone)]
pub struct IdAssignmentHook {
    sequences: Arc<dyn SequenceStore>,
}

impl IdAssignmentHook {
    #[must_use]
    pub fn new(sequences: Arc<dyn SequenceStore>) -> Self {
        Self { sequences }
    }

    /// Run the hook using the current time.
    pub async fn apply(&self, pending: PendingWrite) -> Result<ReadyWrite, SequenceError> {
        self.apply_at(pending, Utc::now()).await
    }

    /// Run the hook with an explicit clock reading.
    pub async fn apply_at(
        &self,
        pending: PendingWrite,
        now: DateTime<Utc>,
    ) -> Result<ReadyWrite, SequenceError> {
        match pending {
            PendingWrite::Create(new_item) => {
                let item_id = match self.sequences.next_value(ITEM_ID_SEQUENCE).await {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("itemId assignment failed, aborting write: {e}");
                        return Err(e);
                    }
                };
                debug!(item_id, "Assigned itemId");
                Ok(ReadyWrite {
                    item: new_item.into_item(item_id, now),
                    intent: WriteIntent::Create,
                })
            }
            PendingWrite::Update(mut item) => {
                item.date_modified = Some(modification_time(&item, now));
                Ok(ReadyWrite {
                    item,
                    intent: WriteIntent::Update,
                })
            }
        }
    }
}

/// `now`, moved forward if needed so it is strictly after every earlier stamp.
fn modification_time(item: &InventoryItem, now: DateTime<Utc>) -> DateTime<Utc> {
    let latest = item
        .date_modified
        .map_or(item.date_created, |modified| modified.max(item.date_created));
    // Clocks of different instances can disagree
    latest
        .checked_add_signed(Duration::nanoseconds(1))
        .map_or(now, |floor| now.max(floor))
}
