//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::repos::{Category, CategoryInput, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{CategoryId, JsonBody};
use crate::http::server::AppState;

/// POST /categories - create a new category
async fn create_category(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = CategoryRepo::new(&state.pool)
        .create(&input)
        .await
        .map_err(ApiError::db("Failed to create category"))?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /categories - list all categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CategoryRepo::new(&state.pool)
        .list()
        .await
        .map_err(ApiError::db("Failed to retrieve categories"))?;

    Ok(Json(categories))
}

/// GET /categories/{id} - get a single category
async fn get_category(
    State(state): State<Arc<AppState>>,
    CategoryId(id): CategoryId,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryRepo::new(&state.pool)
        .get(id)
        .await
        .map_err(ApiError::db("Failed to retrieve category"))?;

    Ok(Json(category))
}

/// PUT /categories/{id} - overwrite name and status
async fn update_category(
    State(state): State<Arc<AppState>>,
    CategoryId(id): CategoryId,
    JsonBody(input): JsonBody<CategoryInput>,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryRepo::new(&state.pool)
        .update(id, &input)
        .await
        .map_err(ApiError::db("Failed to update category"))?;

    Ok(Json(category))
}

/// DELETE /categories/{id} - delete and return the removed row
async fn delete_category(
    State(state): State<Arc<AppState>>,
    CategoryId(id): CategoryId,
) -> Result<Json<Category>, ApiError> {
    let category = CategoryRepo::new(&state.pool)
        .delete(id)
        .await
        .map_err(ApiError::db("Failed to delete category"))?;

    Ok(Json(category))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
