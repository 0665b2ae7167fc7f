// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod app;
pub mod category;
pub mod config;
pub mod cors;
pub mod http_logging;
pub mod inventory;
pub mod logging;
pub mod sequence;
pub mod server;
pub mod store;
pub mod supplier;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use category::{Categories, Category, CategoryError, CreateCategoryRequest};
pub use config::{load_config, ConfigError, DaemonConfig};
pub use inventory::{
    CreateInventoryRequest, IdAssignmentHook, Inventory, InventoryError, InventoryItem,
    InventoryPatch, NewInventoryItem, PendingWrite, ReadyWrite, UpdateInventoryRequest,
    WriteIntent,
};
pub use sequence::{
    FileSequenceStore, MemorySequenceStore, SequenceError, SequenceStore, ITEM_ID_SEQUENCE,
};
pub use server::{build_router, AppState};
pub use store::{Collection, Document, StoreError};
pub use supplier::{CreateSupplierRequest, Supplier, SupplierDeletion, SupplierError, Suppliers};
pub use validation::ValidationError;
