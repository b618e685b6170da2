//! Repository implementations for database access
//!
//! Each repository owns the SQL for one table and issues exactly one
//! parameterized statement per method.

pub mod categories;
pub mod products;

pub use categories::{Category, CategoryInput, CategoryRepo};
pub use products::{Product, ProductInput, ProductRepo, ProductWithCategory};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }
}
