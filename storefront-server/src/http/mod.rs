//! HTTP server layer
//!
//! Axum server with:
//! - CORS restricted to one configured origin
//! - Static security headers on every response
//! - Request tracing
//! - Graceful shutdown followed by pool close
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod headers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
