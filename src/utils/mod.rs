mod atomic;

pub use atomic::{atomic_create, atomic_write};

use std::path::PathBuf;

/// The name of the per-user inventory folder
pub const INVENTORY_FOLDER: &str = ".inventory";

/// Get the per-user inventory folder (`~/.inventory`).
///
/// Falls back to `./.inventory` when the home directory cannot be determined.
#[must_use]
pub fn get_inventory_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(INVENTORY_FOLDER)
}

/// Default location of the document store.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    get_inventory_home().join("data")
}

/// Default location of the daemon logs.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    get_inventory_home().join("logs")
}
