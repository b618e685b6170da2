//! Product repository
//!
//! CRUD over the `products` table plus one joined read against
//! `categories`.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use super::DbError;

const RESOURCE: &str = "product";

/// Product record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub product_description: String,
    pub status_id: i32,
    pub category_id: i32,
}

/// Mutable product fields, used for both create and update
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub product_name: String,
    pub status_id: i32,
    pub product_description: String,
    pub category_id: i32,
}

/// Product paired with its category's name and status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ProductWithCategory {
    pub product_id: i32,
    pub product_name: String,
    pub product_status: i32,
    pub product_description: String,
    pub category_id: i32,
    pub category_name: String,
    pub category_status: i32,
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product and return it with its generated id.
    ///
    /// `category_id` is passed through as given; the schema does not check it.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, DbError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (product_name, status_id, product_description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_name, product_description, status_id, category_id
            "#,
        )
        .bind(&input.product_name)
        .bind(input.status_id)
        .bind(&input.product_description)
        .bind(input.category_id)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// List every product. No ordering is guaranteed.
    pub async fn list(&self) -> Result<Vec<Product>, DbError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_name, product_description, status_id, category_id
            FROM products
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// List products joined with their category.
    ///
    /// INNER JOIN: products whose category is missing are excluded.
    pub async fn list_with_categories(&self) -> Result<Vec<ProductWithCategory>, DbError> {
        let rows = sqlx::query_as::<_, ProductWithCategory>(
            r#"
            SELECT
                p.id AS product_id,
                p.product_name,
                p.status_id AS product_status,
                p.product_description,
                c.id AS category_id,
                c.category_name,
                c.status_id AS category_status
            FROM products p
            INNER JOIN categories c ON p.category_id = c.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Get a single product by id.
    pub async fn get(&self, id: i32) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, product_name, product_description, status_id, category_id
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Overwrite all four mutable fields. Misses report `NotFound`.
    pub async fn update(&self, id: i32, input: &ProductInput) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET product_name = $1, status_id = $2, product_description = $3, category_id = $4
            WHERE id = $5
            RETURNING id, product_name, product_description, status_id, category_id
            "#,
        )
        .bind(&input.product_name)
        .bind(input.status_id)
        .bind(&input.product_description)
        .bind(input.category_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Delete a product, returning the removed row.
    pub async fn delete(&self, id: i32) -> Result<Product, DbError> {
        sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products
            WHERE id = $1
            RETURNING id, product_name, product_description, status_id, category_id
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }
}
