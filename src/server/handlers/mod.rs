pub mod category;
pub mod health;
pub mod inventory;
pub mod supplier;

use crate::server::structured_error::ApiError;

/// Parse a numeric id taken from the URL path.
fn parse_path_id(field: &str, raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::bad_request(format!("{field} must be a non-negative integer")))
}
