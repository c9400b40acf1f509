//! # DB User Provider Infrastructure
//!
//! Concrete database access for the DB user provider, built on SQLx.
//!
//! ## Architecture
//!
//! - **Database**: lazily connected `AnyPool` connection sources, dialect
//!   specific SQL rendering and the read-only user repository
//! - **Bootstrap**: the factory registry the host loads at process start
//!
//! ## Features
//!
//! - `postgres`: PostgreSQL driver (default)
//! - `mysql`: MySQL and MariaDB driver (default)
//! - `sqlite`: SQLite driver (default)

// Re-export core types for convenience
pub use dbup_core::errors::*;

/// Database module - SQLx implementations
pub mod database;

/// Factory registration at process start
pub mod bootstrap;

pub use bootstrap::{default_factory, registry};
pub use database::{SqlDataSource, SqlDataSourceBuilder, SqlDialect, SqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database driver error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] dbup_shared::ConfigError),

    /// Error raised by the provider layer
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::database(e),
            InfrastructureError::Config(e) => DomainError::Configuration(e),
            InfrastructureError::Domain(e) => e,
        }
    }
}
