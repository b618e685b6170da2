//! Database layer - connection pool and repositories
//!
//! - One process-scoped pool, connections acquired per statement
//! - One statement per repository method, no transactions
//! - By-id misses are reported as `DbError::NotFound`, never as empty rows

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
