//! Services implementing the host-facing provider contract.

pub mod credential;
pub mod provider;

// Re-export commonly used types
pub use credential::HashAlgorithm;
pub use provider::{
    DbUserStorageProvider, DbUserStorageProviderFactory, ProviderConfig, ProviderRegistry,
    UserStorageProvider, UserStorageProviderFactory, PROVIDER_ID,
};
