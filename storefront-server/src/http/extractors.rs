//! Custom Axum extractors
//!
//! Rejections are turned into `ApiError` so every failure shares the
//! `{"error": ...}` body shape.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Read the `{id}` path segment as a row id.
///
/// A segment that is not an integer cannot name any row, so it is reported
/// as the resource's 404 rather than a decode failure.
async fn row_id<S>(parts: &mut Parts, state: &S, resource: &'static str) -> Result<i32, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| ApiError::NotFound { resource })?;

    raw.parse().map_err(|_| ApiError::NotFound { resource })
}

/// Category id from path
pub struct CategoryId(pub i32);

impl<S> FromRequestParts<S> for CategoryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        row_id(parts, state, "category").await.map(Self)
    }
}

/// Product id from path
pub struct ProductId(pub i32);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        row_id(parts, state, "product").await.map(Self)
    }
}

/// JSON request body with rejections mapped to a 400 `ApiError`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}
