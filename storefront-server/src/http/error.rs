//! API error types with IntoResponse
//!
//! Every error body has the shape `{"error": "<message>"}`. Database
//! failures are logged in full and answered with a fixed message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be decoded (400)
    BadRequest { message: String },

    /// No row with the requested id (404)
    NotFound { resource: &'static str },

    /// Path exists but not for this method (405)
    MethodNotAllowed,

    /// Statement failed (500, logged)
    Database {
        message: &'static str,
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Map a store error, using `message` as the client-facing text for
    /// data-access failures.
    ///
    /// ```ignore
    /// repo.create(&input).await.map_err(ApiError::db("Failed to create category"))?;
    /// ```
    pub fn db(message: &'static str) -> impl FnOnce(DbError) -> ApiError {
        move |err| match err {
            DbError::NotFound { resource, .. } => ApiError::NotFound { resource },
            DbError::Sqlx(source) => ApiError::Database { message, source },
        }
    }
}

/// "category" -> "Category"
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            Self::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                format!("{} not found", capitalize(resource)),
            ),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_owned(),
            ),
            Self::Database { message, source } => {
                // Log the actual error, return the fixed message
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
