//! Product endpoints, including the category-joined listing

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Product, ProductInput, ProductRepo, ProductWithCategory};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ProductId};
use crate::http::server::AppState;

/// POST /products - create a new product
async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = ProductRepo::new(&state.pool)
        .create(&input)
        .await
        .map_err(ApiError::db("Failed to create product"))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products - list all products
async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductRepo::new(&state.pool)
        .list()
        .await
        .map_err(ApiError::db("Failed to retrieve products"))?;

    Ok(Json(products))
}

/// GET /products-detailed - products joined with their category
async fn list_products_detailed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductWithCategory>>, ApiError> {
    let rows = ProductRepo::new(&state.pool)
        .list_with_categories()
        .await
        .map_err(ApiError::db("Failed to retrieve products with categories"))?;

    Ok(Json(rows))
}

/// GET /products/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let product = ProductRepo::new(&state.pool)
        .get(id)
        .await
        .map_err(ApiError::db("Failed to retrieve product"))?;

    Ok(Json(product))
}

/// PUT /products/{id} - overwrite all mutable fields
async fn update_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
    JsonBody(input): JsonBody<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let product = ProductRepo::new(&state.pool)
        .update(id, &input)
        .await
        .map_err(ApiError::db("Failed to update product"))?;

    Ok(Json(product))
}

/// DELETE /products/{id} - delete and return the removed row
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ProductId(id): ProductId,
) -> Result<Json<Product>, ApiError> {
    let product = ProductRepo::new(&state.pool)
        .delete(id)
        .await
        .map_err(ApiError::db("Failed to delete product"))?;

    Ok(Json(product))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products-detailed", get(list_products_detailed))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
