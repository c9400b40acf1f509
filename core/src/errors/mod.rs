//! Domain error types

use dbup_shared::ConfigError;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Unsupported hash algorithm: {identifier}")]
    UnsupportedHashAlgorithm { identifier: String },

    #[error("Invalid storage id: {value}")]
    InvalidStorageId { value: String },

    #[error("Provider factory already registered: {id}")]
    DuplicateFactory { id: String },
}

impl DomainError {
    /// Build a database error from any displayable cause
    pub fn database(cause: impl std::fmt::Display) -> Self {
        DomainError::Database {
            message: cause.to_string(),
        }
    }
}

/// Configuration rejected during explicit validation
///
/// Carries the message of the error that caused it so the host can show it.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ComponentValidationError {
    pub message: String,
    #[source]
    pub source: DomainError,
}

impl From<DomainError> for ComponentValidationError {
    fn from(source: DomainError) -> Self {
        Self {
            message: source.to_string(),
            source,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
