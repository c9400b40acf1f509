//! Database module - SQLx implementations
//!
//! This module provides:
//! - Lazily connected connection pools, one per provider configuration
//! - Dialect specific rendering of the fixed statements
//! - The read-only user repository

pub mod connection;
pub mod dialect;
pub mod sql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{PoolStatistics, SqlDataSource, SqlDataSourceBuilder};
pub use dialect::SqlDialect;
pub use sql::SqlUserRepository;
