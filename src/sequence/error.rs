//! Error types for sequence counters.

use thiserror::Error;

/// Errors raised while minting sequence values.
///
/// A failed call never issues a value: the stored counter is either
/// untouched or already durably advanced (in which case the value is lost,
/// never reused).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Sequence store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Sequence '{name}' exhausted: cannot advance past {value}")]
    SequenceExhausted { name: String, value: u64 },

    #[error("Invalid sequence name: '{0}'")]
    InvalidName(String),
}

impl SequenceError {
    /// Create a store-unavailable error with a message
    pub fn unavailable(msg: impl Into<String>) -> Self {
        SequenceError::StoreUnavailable(msg.into())
    }
}

impl From<std::io::Error> for SequenceError {
    fn from(err: std::io::Error) -> Self {
        SequenceError::StoreUnavailable(format!("I/O error: {err}"))
    }
}
