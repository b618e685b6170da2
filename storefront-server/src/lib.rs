//! storefront-server: HTTP CRUD service for categories and products
//!
//! Each endpoint maps to exactly one parameterized statement against a
//! shared PostgreSQL pool. Rows come back unmodified as JSON.

pub mod db;
pub mod http;

pub use db::{create_pool, create_pool_with_options};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

/// Reference DDL for the two tables the service reads and writes.
pub const SCHEMA_SQL: &str = include_str!("../schema.sql");
