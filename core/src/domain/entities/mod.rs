//! Domain entities representing users read from the external database.

pub mod user;


// Re-export commonly used types
pub use user::{FederatedUser, UserRecord};
