//! Factory registration at process start.

use dbup_core::services::{DbUserStorageProviderFactory, ProviderRegistry};
use dbup_shared::PoolConfig;
use std::sync::Arc;

use crate::database::SqlDataSourceBuilder;
use crate::InfrastructureError;

/// The sqlx-backed factory reading the process environment
pub fn default_factory() -> DbUserStorageProviderFactory {
    let builder = SqlDataSourceBuilder::new(PoolConfig::default());
    DbUserStorageProviderFactory::from_env(Arc::new(builder))
}

/// Registry holding every factory this crate provides
///
/// Loads a `.env` file from the working directory first, if there is one.
pub fn registry() -> Result<ProviderRegistry, InfrastructureError> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(default_factory()))?;
    Ok(registry)
}
