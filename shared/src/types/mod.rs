//! Type definitions shared across crates
//!
//! - `pagination` - Offset/limit window for list queries

pub mod pagination;

pub use pagination::Pageable;
