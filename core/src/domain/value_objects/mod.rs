//! Value objects representing immutable domain concepts.

pub mod component;
pub mod query_configurations;
pub mod storage_id;

// Re-export commonly used types
pub use component::{ComponentModel, ConfigProperty, CredentialInput, SessionContext, PASSWORD_CREDENTIAL};
pub use query_configurations::{
    QueryConfigurations, FIND_HASH_PASS_BY_USERNAME, SHA_256, SQL_COUNT, SQL_FIND_BY_ID,
    SQL_FIND_BY_SEARCH_TERM, SQL_FIND_BY_USERNAME, SQL_LIST_ALL,
};
pub use storage_id::StorageId;
