use crate::category::CategoryError;
use crate::inventory::InventoryError;
use crate::sequence::SequenceError;
use crate::store::StoreError;
use crate::supplier::SupplierError;
use crate::validation::ValidationError;
use http::StatusCode;

const STORE_UNAVAILABLE_TIP: &str =
    "Check that the data directory is writable and not locked by another process";

/// Trait for mapping domain errors to structured error codes, optional tips
/// and HTTP status codes.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
    fn http_status(&self) -> StatusCode;
}

// ── SequenceError ──────────────────────────────────────────────────────────────
impl ToStructuredError for SequenceError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            SequenceError::StoreUnavailable(_) => {
                ("STORE_UNAVAILABLE", Some(STORE_UNAVAILABLE_TIP))
            }
            SequenceError::SequenceExhausted { .. } => ("SEQUENCE_EXHAUSTED", None),
            SequenceError::InvalidName(_) => ("INVALID_SEQUENCE_NAME", None),
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            SequenceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SequenceError::SequenceExhausted { .. } | SequenceError::InvalidName(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// ── StoreError ─────────────────────────────────────────────────────────────────
impl ToStructuredError for StoreError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            StoreError::IoError(_) => ("IO_ERROR", None),
            StoreError::JsonError(_) => ("JSON_ERROR", None),
            StoreError::NotFound(_) => ("ITEM_NOT_FOUND", None),
            StoreError::AlreadyExists(_) => ("ALREADY_EXISTS", None),
            StoreError::InvalidId(_) => ("BAD_REQUEST", None),
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            StoreError::IoError(_) | StoreError::JsonError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::AlreadyExists(_) => StatusCode::CONFLICT,
            StoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// ── ValidationError ────────────────────────────────────────────────────────────
impl ToStructuredError for ValidationError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            ValidationError::EmptyUpdate => (
                "VALIDATION_ERROR",
                Some("Include at least one of supplierId, name, description, quantity or price"),
            ),
            _ => ("VALIDATION_ERROR", None),
        }
    }

    fn http_status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

// ── InventoryError ─────────────────────────────────────────────────────────────
impl ToStructuredError for InventoryError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            InventoryError::NotFound { .. } => ("ITEM_NOT_FOUND", None),
            InventoryError::IdAssignment(e) => e.error_code_and_tip(),
            InventoryError::Store(e) => e.error_code_and_tip(),
            InventoryError::Validation(e) => e.error_code_and_tip(),
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            InventoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            InventoryError::IdAssignment(e) => e.http_status(),
            InventoryError::Store(e) => e.http_status(),
            InventoryError::Validation(e) => e.http_status(),
        }
    }
}

// ── SupplierError ──────────────────────────────────────────────────────────────
impl ToStructuredError for SupplierError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            SupplierError::NotFound { .. } => ("ITEM_NOT_FOUND", None),
            SupplierError::NotFoundById(_) => (
                "ITEM_NOT_FOUND",
                Some("List suppliers to find the _id of the one to delete"),
            ),
            SupplierError::Store(e) => e.error_code_and_tip(),
            SupplierError::Validation(e) => e.error_code_and_tip(),
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            SupplierError::NotFound { .. } | SupplierError::NotFoundById(_) => {
                StatusCode::NOT_FOUND
            }
            SupplierError::Store(e) => e.http_status(),
            SupplierError::Validation(e) => e.http_status(),
        }
    }
}

// ── CategoryError ──────────────────────────────────────────────────────────────
impl ToStructuredError for CategoryError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        match self {
            CategoryError::NotFound { .. } => ("ITEM_NOT_FOUND", None),
            CategoryError::AlreadyExists(_) => {
                ("ALREADY_EXISTS", Some("Choose an unused categoryId"))
            }
            CategoryError::Store(e) => e.error_code_and_tip(),
            CategoryError::Validation(e) => e.error_code_and_tip(),
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            CategoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            CategoryError::AlreadyExists(_) => StatusCode::CONFLICT,
            CategoryError::Store(e) => e.http_status(),
            CategoryError::Validation(e) => e.http_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_errors() {
        let unavailable = SequenceError::unavailable("disk full");
        assert_eq!(
            unavailable.error_code_and_tip(),
            ("STORE_UNAVAILABLE", Some(STORE_UNAVAILABLE_TIP))
        );
        assert_eq!(unavailable.http_status(), StatusCode::SERVICE_UNAVAILABLE);

        let exhausted = SequenceError::SequenceExhausted {
            name: "itemId".to_string(),
            value: u64::MAX,
        };
        assert_eq!(exhausted.error_code_and_tip().0, "SEQUENCE_EXHAUSTED");
        assert_eq!(exhausted.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_inventory_errors_delegate() {
        let err = InventoryError::from(SequenceError::unavailable("timeout"));
        assert_eq!(err.error_code_and_tip().0, "STORE_UNAVAILABLE");
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);

        let err = InventoryError::NotFound { item_id: 3 };
        assert_eq!(err.error_code_and_tip(), ("ITEM_NOT_FOUND", None));
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err = InventoryError::from(ValidationError::Required { field: "name" });
        assert_eq!(err.error_code_and_tip().0, "VALIDATION_ERROR");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_category_conflict() {
        let err = CategoryError::AlreadyExists(2);
        assert_eq!(err.error_code_and_tip().0, "ALREADY_EXISTS");
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_supplier_not_found_by_id_has_tip() {
        let err = SupplierError::NotFoundById("abc".to_string());
        assert!(err.error_code_and_tip().1.is_some());
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }
}
