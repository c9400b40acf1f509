//! User storage provider module
//!
//! This module provides the host-facing side of the plugin:
//! - The provider and factory contract the host calls into
//! - The database-backed provider created once per session
//! - The factory that resolves and caches one configuration per component
//! - The registry that maps factory ids to factories

mod db_provider;
mod factory;
mod registry;
mod spi;

#[cfg(test)]
mod tests;

pub use db_provider::DbUserStorageProvider;
pub use factory::{DbUserStorageProviderFactory, ProviderConfig, PROVIDER_ID};
pub use registry::ProviderRegistry;
pub use spi::{UserStorageProvider, UserStorageProviderFactory};
