//! Shared configuration types for the DB user provider
//!
//! This crate provides the pieces every other crate in the workspace reads:
//! - Dialect selection and pool tuning
//! - Connection settings resolved from the environment
//! - Configuration error types
//! - Paging parameters for list queries

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    ConnectionSettings, EnvSource, MapEnv, PoolConfig, ProcessEnv, Rdbms,
    ENV_VAR_PASSWORD, ENV_VAR_RDBMS, ENV_VAR_URL, ENV_VAR_USERNAME,
};
pub use errors::{ConfigError, ConfigResult};
pub use types::Pageable;
