//! Tests for the provider, factory and registry

mod factory_tests;
mod provider_tests;

use dbup_shared::{MapEnv, ENV_VAR_PASSWORD, ENV_VAR_RDBMS, ENV_VAR_URL, ENV_VAR_USERNAME};
use std::sync::Arc;

use crate::domain::value_objects::{ComponentModel, SessionContext};
use crate::repositories::{MockDataSourceBuilder, MockUserRepository};
use crate::services::provider::DbUserStorageProviderFactory;

/// Route provider logs to the test output; `RUST_LOG` selects the level
pub(super) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub(super) fn valid_env() -> MapEnv {
    MapEnv::new()
        .with(ENV_VAR_URL, "postgres://db.internal:5432/users")
        .with(ENV_VAR_USERNAME, "keycloak")
        .with(ENV_VAR_PASSWORD, "s3cret")
        .with(ENV_VAR_RDBMS, "postgresql")
}

pub(super) fn factory_with(
    env: MapEnv,
    repository: MockUserRepository,
) -> (DbUserStorageProviderFactory, Arc<MockDataSourceBuilder>) {
    let builder = Arc::new(MockDataSourceBuilder::with_repository(repository));
    let factory = DbUserStorageProviderFactory::new(Arc::new(env), builder.clone());
    (factory, builder)
}

pub(super) fn component(id: &str) -> ComponentModel {
    ComponentModel::new(id, format!("{}-name", id), "realm-1")
}

pub(super) fn session() -> SessionContext {
    SessionContext::new("realm-1")
}
