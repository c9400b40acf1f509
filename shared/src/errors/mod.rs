//! Configuration error types
//!
//! Every variant is fatal for the resolution that raised it. Nothing here is
//! retried or replaced with a default.

use thiserror::Error;

/// Errors raised while resolving provider configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Environment variable {name} is not set")]
    MissingVariable { name: &'static str },

    /// The dialect name does not match any known dialect
    #[error("Unknown RDBMS dialect: {value}")]
    UnknownDialect { value: String },

    /// The connection URL could not be used for the selected dialect
    #[error("Invalid database URL: {message}")]
    InvalidUrl { message: String },
}

impl ConfigError {
    /// Name of the missing variable, if this is a missing-variable error
    pub fn missing_variable(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingVariable { name } => Some(name),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
