//! Domain layer containing user entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{FederatedUser, UserRecord};
pub use value_objects::*;
