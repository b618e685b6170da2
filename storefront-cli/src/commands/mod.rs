//! Command implementations for the storefront CLI

pub mod serve;

pub use serve::run_serve;
