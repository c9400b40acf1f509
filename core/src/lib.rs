//! # DB User Provider Core
//!
//! Domain types, the host-facing provider contract, and the factory that
//! resolves and caches one database configuration per host component.
//! Concrete database access lives in `dbup_infra`; this crate only defines
//! the traits it implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
