//! Suppliers.
//!
//! Unlike inventory items, suppliers carry a client-chosen `supplierId` that
//! is not unique; deletes disambiguate through the internal `_id`.

mod crud;
mod types;

pub use crud::Suppliers;
pub use types::{
    CreateSupplierRequest, DeleteSupplierRequest, Supplier, SupplierDeletion, SupplierError,
    SUPPLIER_REQUIRED_FIELDS,
};
