//! Category repository
//!
//! Plain CRUD over the `categories` table. Every write returns the
//! affected row via `RETURNING`.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::DbError;

const RESOURCE: &str = "category";

/// Category record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
    pub status_id: i32,
}

/// Mutable category fields, used for both create and update
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub category_name: String,
    pub status_id: i32,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a category and return it with its generated id.
    pub async fn create(&self, input: &CategoryInput) -> Result<Category, DbError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (category_name, status_id)
            VALUES ($1, $2)
            RETURNING id, category_name, status_id
            "#,
        )
        .bind(&input.category_name)
        .bind(input.status_id)
        .fetch_one(self.pool)
        .await?;

        Ok(category)
    }

    /// List every category. No ordering is guaranteed.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, category_name, status_id FROM categories")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Get a single category by id.
    pub async fn get(&self, id: i32) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            "SELECT id, category_name, status_id FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Overwrite both mutable fields. Misses report `NotFound`, same as `get`.
    pub async fn update(&self, id: i32, input: &CategoryInput) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET category_name = $1, status_id = $2
            WHERE id = $3
            RETURNING id, category_name, status_id
            "#,
        )
        .bind(&input.category_name)
        .bind(input.status_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Delete a category, returning the removed row.
    pub async fn delete(&self, id: i32) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            "DELETE FROM categories WHERE id = $1 RETURNING id, category_name, status_id",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }
}
