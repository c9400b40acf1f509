//! In-memory implementation of UserRepository

use async_trait::async_trait;
use dbup_shared::Pageable;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Debug, Clone)]
struct StoredUser {
    record: UserRecord,
    hash: Option<String>,
}

/// In-memory user table for tests and embedding
///
/// Rows are ordered by id so paging is deterministic.
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<BTreeMap<String, StoredUser>>>,
    queries: Arc<AtomicUsize>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a row
    pub async fn insert(&self, record: UserRecord, hash: Option<String>) {
        let mut users = self.users.write().await;
        users.insert(record.id.clone(), StoredUser { record, hash });
    }

    /// Replace the email of an existing row
    pub async fn set_email(&self, id: &str, email: Option<String>) {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(id) {
            user.record.email = email;
        }
    }

    /// Number of repository calls served so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }

    async fn list_all(&self, page: Pageable) -> Result<Vec<UserRecord>, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(page.apply(users.values().map(|u| u.record.clone())))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(users.get(id).map(|u| u.record.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.record.username == username)
            .map(|u| u.record.clone()))
    }

    async fn search(&self, term: &str, page: Pageable) -> Result<Vec<UserRecord>, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(page.apply(
            users
                .values()
                .filter(|u| u.record.username_matches(term))
                .map(|u| u.record.clone()),
        ))
    }

    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, DomainError> {
        self.record_query();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.record.username == username)
            .and_then(|u| u.hash.clone()))
    }
}
