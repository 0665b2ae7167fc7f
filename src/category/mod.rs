//! Product categories, keyed by a unique client-chosen `categoryId`.

mod crud;
mod types;

pub use crud::Categories;
pub use types::{Category, CategoryError, CreateCategoryRequest, CATEGORY_REQUIRED_FIELDS};
