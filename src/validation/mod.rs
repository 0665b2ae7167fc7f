//! Request field validation shared by the record types.
//!
//! Messages follow the `<field>: <rule>` form clients already match on, e.g.
//! `name: Must not have fewer than 3 characters.`

use thiserror::Error;

/// Minimum length of an inventory item name.
pub const MIN_NAME_LENGTH: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: Is required.")]
    Required { field: &'static str },

    #[error("{field}: Must not have fewer than {min} characters.")]
    TooShort { field: &'static str, min: usize },

    #[error("{field}: Must be greater than or equal to 0.")]
    Negative { field: &'static str },

    #[error("{field}: Must be a positive integer.")]
    NotPositive { field: &'static str },

    #[error("{field}: Must be a finite number.")]
    NotFinite { field: &'static str },

    #[error("Update must change at least one field")]
    EmptyUpdate,

    #[error("{0}")]
    Custom(String),
}

impl ValidationError {
    /// Create a custom validation error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        ValidationError::Custom(msg.into())
    }
}

/// Require a string to be present and at least `min` characters long.
pub fn require_min_length(
    field: &'static str,
    value: Option<String>,
    min: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Required { field })?;
    check_min_length(field, &value, min)?;
    Ok(value)
}

/// Check that `value` is at least `min` characters long (after trimming).
pub fn check_min_length(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

/// Check a non-negative integer field such as a quantity.
pub fn non_negative_integer(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_| ValidationError::Negative { field })
}

/// Check a non-negative, finite number field such as a price.
pub fn non_negative_number(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Check an identifier field that must be a positive integer.
pub fn positive_id(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    match u64::try_from(value) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::NotPositive { field }),
    }
}

/// Treat blank strings as absent.
#[must_use]
pub fn nonblank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
