//! Tests for configuration resolution and the instance cache

use chrono::{TimeZone, Utc};
use dbup_shared::{ConfigError, Rdbms, ENV_VAR_PASSWORD, ENV_VAR_RDBMS, ENV_VAR_URL, ENV_VAR_USERNAME};
use std::sync::Arc;

use crate::domain::value_objects::{
    FIND_HASH_PASS_BY_USERNAME, SQL_COUNT, SQL_FIND_BY_ID, SQL_FIND_BY_SEARCH_TERM,
    SQL_FIND_BY_USERNAME, SQL_LIST_ALL,
};
use crate::errors::DomainError;
use crate::repositories::{DataSource, MockUserRepository};
use crate::services::provider::factory::pool_display_name;
use crate::services::provider::{UserStorageProviderFactory, PROVIDER_ID};

use super::{component, factory_with, init_tracing, session, valid_env};

#[tokio::test]
async fn test_missing_variable_fails_and_caches_nothing() {
    for name in [ENV_VAR_URL, ENV_VAR_USERNAME, ENV_VAR_PASSWORD, ENV_VAR_RDBMS] {
        let (factory, builder) = factory_with(valid_env().without(name), MockUserRepository::new());

        let result = factory.create(&session(), &component("c1")).await;
        match result {
            Err(DomainError::Configuration(ConfigError::MissingVariable { name: missing })) => {
                assert_eq!(missing, name)
            }
            Err(other) => panic!("unexpected error for {name}: {other}"),
            Ok(_) => panic!("resolution should fail without {name}"),
        }

        assert_eq!(factory.cached_count().await, 0);
        assert!(builder.built().is_empty());
    }
}

#[tokio::test]
async fn test_unknown_dialect_fails() {
    let (factory, _) = factory_with(valid_env().with(ENV_VAR_RDBMS, "sybase"), MockUserRepository::new());

    let err = factory.provider_config(&component("c1")).await.err().unwrap();
    assert!(matches!(
        err,
        DomainError::Configuration(ConfigError::UnknownDialect { ref value }) if value == "sybase"
    ));
    assert_eq!(factory.cached_count().await, 0);
}

#[tokio::test]
async fn test_resolution_produces_fixed_statements() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());

    let config = factory.provider_config(&component("c1")).await.unwrap();
    let queries = config.queries();
    assert_eq!(queries.count, SQL_COUNT);
    assert_eq!(queries.list_all, SQL_LIST_ALL);
    assert_eq!(queries.find_by_id, SQL_FIND_BY_ID);
    assert_eq!(queries.find_by_username, SQL_FIND_BY_USERNAME);
    assert_eq!(queries.find_by_search_term, SQL_FIND_BY_SEARCH_TERM);
    assert_eq!(queries.find_password_hash, FIND_HASH_PASS_BY_USERNAME);
    assert_eq!(queries.hash_function, "SHA-256");
    assert_eq!(queries.rdbms, Rdbms::PostgreSql);

    let built = builder.built();
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].settings().url, "postgres://db.internal:5432/users");
    assert_eq!(built[0].settings().username, "keycloak");
    assert!(built[0].name().starts_with("db-user-provider-c1-name-"));
}

#[tokio::test]
async fn test_repeated_create_shares_data_source() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    let model = component("c1");

    let first = factory.create_provider(&session(), &model).await.unwrap();
    let second = factory.create_provider(&session(), &model).await.unwrap();

    assert!(Arc::ptr_eq(first.data_source(), second.data_source()));
    assert!(Arc::ptr_eq(first.query_configurations(), second.query_configurations()));
    assert_ne!(first.session().id, second.session().id);
    assert_eq!(builder.built().len(), 1);
}

#[tokio::test]
async fn test_components_get_separate_data_sources() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());

    let a = factory.create_provider(&session(), &component("a")).await.unwrap();
    let b = factory.create_provider(&session(), &component("b")).await.unwrap();

    assert!(!Arc::ptr_eq(a.data_source(), b.data_source()));
    assert_eq!(builder.built().len(), 2);
    assert_eq!(factory.cached_count().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_create_resolves_once() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    let factory = Arc::new(factory);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let factory = factory.clone();
            tokio::spawn(async move { factory.provider_config(&component("c1")).await.unwrap() })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(builder.built().len(), 1);
}

#[tokio::test]
async fn test_validation_replaces_and_closes_previous_once() {
    init_tracing();
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    let model = component("c1");

    let before = factory.provider_config(&model).await.unwrap();
    factory.validate_configuration(&session(), &model).await.unwrap();
    let after = factory.cached_config(&model.id).await.unwrap();

    assert!(!Arc::ptr_eq(before.data_source(), after.data_source()));
    assert!(after.resolved_at() >= before.resolved_at());

    let built = builder.built();
    assert_eq!(built.len(), 2);
    assert_eq!(built[0].close_calls(), 1);
    assert_eq!(built[1].close_calls(), 0);
    assert!(!after.data_source().is_closed());
}

#[tokio::test]
async fn test_validation_without_previous_entry_installs_config() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    let model = component("c1");

    factory.validate_configuration(&session(), &model).await.unwrap();

    assert_eq!(factory.cached_count().await, 1);
    assert_eq!(builder.built()[0].close_calls(), 0);

    // create reuses the validated configuration
    let provider = factory.create_provider(&session(), &model).await.unwrap();
    assert_eq!(provider.data_source().name(), builder.built()[0].name());
    assert_eq!(builder.built().len(), 1);
}

#[tokio::test]
async fn test_validation_failure_is_wrapped_and_keeps_cache() {
    init_tracing();
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    let model = component("c1");
    factory.provider_config(&model).await.unwrap();

    let (broken, _) = factory_with(valid_env().without(ENV_VAR_PASSWORD), MockUserRepository::new());
    let err = broken.validate_configuration(&session(), &model).await.unwrap_err();
    assert_eq!(
        err.message,
        format!("Environment variable {} is not set", ENV_VAR_PASSWORD)
    );
    assert!(matches!(err.source, DomainError::Configuration(_)));
    assert_eq!(broken.cached_count().await, 0);

    // the healthy factory is untouched
    assert_eq!(builder.built()[0].close_calls(), 0);
    assert_eq!(factory.cached_count().await, 1);
}

#[tokio::test]
async fn test_close_closes_every_source_once() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());
    for id in ["a", "b", "c"] {
        factory.provider_config(&component(id)).await.unwrap();
    }

    factory.close().await;
    factory.close().await;

    let built = builder.built();
    assert_eq!(built.len(), 3);
    assert!(built.iter().all(|source| source.close_calls() == 1));
    assert_eq!(factory.cached_count().await, 0);
}

#[tokio::test]
async fn test_close_with_empty_cache() {
    let (factory, builder) = factory_with(valid_env(), MockUserRepository::new());

    factory.close().await;

    assert!(builder.built().is_empty());
}

#[test]
fn test_factory_contract() {
    let (factory, _) = factory_with(valid_env(), MockUserRepository::new());

    assert_eq!(factory.id(), PROVIDER_ID);
    assert_eq!(factory.id(), "singular-db-user-provider");
    assert!(factory.config_properties().is_empty());
}

#[test]
fn test_pool_display_name() {
    let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    assert_eq!(pool_display_name("ldap", at), "db-user-provider-ldap-20240305140709");
}
