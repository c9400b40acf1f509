//! Configuration module
//!
//! - `database` - Dialect selection and connection pool tuning
//! - `provider` - Connection settings read from the environment

pub mod database;
pub mod provider;

// Re-export commonly used types
pub use database::{PoolConfig, Rdbms};
pub use provider::{
    ConnectionSettings, EnvSource, MapEnv, ProcessEnv, ENV_VAR_PASSWORD, ENV_VAR_RDBMS,
    ENV_VAR_URL, ENV_VAR_USERNAME,
};
