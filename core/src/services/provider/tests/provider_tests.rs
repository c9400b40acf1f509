//! Tests for the database-backed provider

use dbup_shared::Pageable;

use crate::domain::entities::{FederatedUser, UserRecord};
use crate::domain::value_objects::{CredentialInput, QueryConfigurations, StorageId};
use crate::errors::DomainError;
use crate::repositories::{MockDataSource, MockUserRepository};
use crate::services::provider::{DbUserStorageProvider, ProviderConfig, UserStorageProvider};

use super::{component, factory_with, session, valid_env};

// sha256("password")
const PASSWORD_SHA256: &str = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

async fn seeded_repository() -> MockUserRepository {
    let repo = MockUserRepository::new();
    repo.insert(
        UserRecord::new("1", "alice", Some("alice@example.com".to_string())),
        Some(PASSWORD_SHA256.to_string()),
    )
    .await;
    repo.insert(UserRecord::new("2", "bob", None), None).await;
    repo.insert(UserRecord::new("3", "Alicia", None), Some(PASSWORD_SHA256.to_uppercase()))
        .await;
    repo
}

async fn provider() -> (DbUserStorageProvider, MockUserRepository) {
    let repo = seeded_repository().await;
    let (factory, _) = factory_with(valid_env(), repo.clone());
    let provider = factory.create_provider(&session(), &component("c1")).await.unwrap();
    (provider, repo)
}

fn provider_with(queries: QueryConfigurations, repo: MockUserRepository) -> DbUserStorageProvider {
    let source = MockDataSource::new(
        dbup_shared::ConnectionSettings::from_source(&valid_env()).unwrap(),
        "test-source",
        repo,
    );
    let config = ProviderConfig::new(std::sync::Arc::new(source), queries);
    DbUserStorageProvider::new(session(), component("c1"), &config).unwrap()
}

#[tokio::test]
async fn test_count_and_list() {
    let (provider, _) = provider().await;

    assert_eq!(provider.users_count().await.unwrap(), 3);

    let users = provider.get_users(Pageable::new(0, 2)).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id(), "f:c1:1");
    assert_eq!(users[0].federation_link, "c1");
}

#[tokio::test]
async fn test_get_user_by_storage_id_and_external_id() {
    let (provider, _) = provider().await;

    let user = provider.get_user_by_id("f:c1:1").await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email.as_deref(), Some("alice@example.com"));

    let user = provider.get_user_by_id("2").await.unwrap().unwrap();
    assert_eq!(user.username, "bob");

    assert!(provider.get_user_by_id("f:c1:99").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_user_owned_by_other_component() {
    let (provider, repo) = provider().await;
    let before = repo.query_count();

    assert!(provider.get_user_by_id("f:other:1").await.unwrap().is_none());
    assert_eq!(repo.query_count(), before);
}

#[tokio::test]
async fn test_get_user_by_malformed_id() {
    let (provider, _) = provider().await;

    let err = provider.get_user_by_id("f:c1").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidStorageId { .. }));
}

#[tokio::test]
async fn test_get_user_by_username() {
    let (provider, _) = provider().await;

    let user = provider.get_user_by_username("bob").await.unwrap().unwrap();
    assert_eq!(user.storage_id, StorageId::new("c1", "2"));
    assert!(provider.get_user_by_username("carol").await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_ignores_case_and_pages() {
    let (provider, _) = provider().await;

    let users = provider.search_for_user("ALI", Pageable::all()).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "Alicia"]);

    let users = provider.search_for_user("ali", Pageable::new(1, 10)).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "Alicia");
}

#[tokio::test]
async fn test_password_validation() {
    let (provider, _) = provider().await;
    let alice = provider.get_user_by_username("alice").await.unwrap().unwrap();
    let alicia = provider.get_user_by_username("Alicia").await.unwrap().unwrap();
    let bob = provider.get_user_by_username("bob").await.unwrap().unwrap();

    assert!(provider.supports_credential_type("password"));
    assert!(!provider.supports_credential_type("otp"));

    assert!(provider.is_valid(&alice, &CredentialInput::password("password")).await.unwrap());
    assert!(!provider.is_valid(&alice, &CredentialInput::password("wrong")).await.unwrap());
    assert!(provider.is_valid(&alicia, &CredentialInput::password("password")).await.unwrap());
    assert!(!provider.is_valid(&bob, &CredentialInput::password("password")).await.unwrap());

    let otp = CredentialInput {
        credential_type: "otp".to_string(),
        value: "password".to_string(),
    };
    assert!(!provider.is_valid(&alice, &otp).await.unwrap());
}

#[tokio::test]
async fn test_unknown_user_is_not_valid() {
    let (provider, _) = provider().await;
    let ghost = FederatedUser::from_record("c1", UserRecord::new("9", "ghost", None));

    assert!(!provider.is_valid(&ghost, &CredentialInput::password("password")).await.unwrap());
}

#[tokio::test]
async fn test_session_copy_kept_without_overwrite() {
    let (provider, repo) = provider().await;

    let first = provider.get_user_by_id("1").await.unwrap().unwrap();
    repo.set_email("1", Some("new@example.com".to_string())).await;
    let second = provider.get_user_by_id("1").await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.email.as_deref(), Some("alice@example.com"));
    assert_eq!(provider.loaded_count().await, 1);
}

#[tokio::test]
async fn test_database_overwrites_session_copy_when_allowed() {
    let repo = seeded_repository().await;
    let mut queries = QueryConfigurations::standard(dbup_shared::Rdbms::PostgreSql);
    queries.allow_database_to_overwrite_keycloak = true;
    let provider = provider_with(queries, repo.clone());

    provider.get_user_by_id("1").await.unwrap().unwrap();
    repo.set_email("1", Some("new@example.com".to_string())).await;
    let refreshed = provider.get_user_by_id("1").await.unwrap().unwrap();

    assert_eq!(refreshed.email.as_deref(), Some("new@example.com"));
}

#[tokio::test]
async fn test_remove_user_follows_delete_flag() {
    let (provider, _) = provider().await;
    let alice = provider.get_user_by_username("alice").await.unwrap().unwrap();
    assert!(!provider.remove_user(&alice).await);
    assert_eq!(provider.loaded_count().await, 1);

    let mut queries = QueryConfigurations::standard(dbup_shared::Rdbms::PostgreSql);
    queries.allow_keycloak_delete = true;
    let provider = provider_with(queries, seeded_repository().await);
    let alice = provider.get_user_by_username("alice").await.unwrap().unwrap();
    assert!(provider.remove_user(&alice).await);
    assert_eq!(provider.loaded_count().await, 0);
}

#[tokio::test]
async fn test_close_clears_session_users() {
    let (provider, _) = provider().await;
    provider.get_users(Pageable::all()).await.unwrap();
    assert_eq!(provider.loaded_count().await, 3);

    provider.close().await;

    assert_eq!(provider.loaded_count().await, 0);
}

#[test]
fn test_unsupported_hash_function_fails_creation() {
    let mut queries = QueryConfigurations::standard(dbup_shared::Rdbms::MySql);
    queries.hash_function = "MD5".to_string();
    let source = MockDataSource::new(
        dbup_shared::ConnectionSettings::from_source(&valid_env()).unwrap(),
        "test-source",
        MockUserRepository::new(),
    );
    let config = ProviderConfig::new(std::sync::Arc::new(source), queries);

    let result = DbUserStorageProvider::new(session(), component("c1"), &config);
    assert!(matches!(result, Err(DomainError::UnsupportedHashAlgorithm { .. })));
}
