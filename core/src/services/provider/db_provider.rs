//! Database-backed user storage provider.

use async_trait::async_trait;
use dbup_shared::Pageable;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{FederatedUser, UserRecord};
use crate::domain::value_objects::{
    ComponentModel, CredentialInput, QueryConfigurations, SessionContext, StorageId,
    PASSWORD_CREDENTIAL,
};
use crate::errors::DomainResult;
use crate::repositories::{DataSource, UserRepository};
use crate::services::credential::HashAlgorithm;

use super::factory::ProviderConfig;
use super::spi::UserStorageProvider;

/// Provider bound to one session and one cached configuration
///
/// Users loaded during the session are kept keyed by external id. Whether a
/// later read replaces a kept user is decided by
/// `allow_database_to_overwrite_keycloak`.
pub struct DbUserStorageProvider {
    session: SessionContext,
    model: ComponentModel,
    data_source: Arc<dyn DataSource>,
    queries: Arc<QueryConfigurations>,
    repository: Arc<dyn UserRepository>,
    hash_algorithm: HashAlgorithm,
    loaded_users: RwLock<HashMap<String, FederatedUser>>,
}

impl DbUserStorageProvider {
    /// Bind a provider to `config`
    ///
    /// Fails when the configured hash identifier is not supported.
    pub fn new(
        session: SessionContext,
        model: ComponentModel,
        config: &ProviderConfig,
    ) -> DomainResult<Self> {
        let queries = config.queries().clone();
        let hash_algorithm = HashAlgorithm::from_identifier(&queries.hash_function)?;
        let data_source = config.data_source().clone();
        let repository = data_source.user_repository(queries.clone());

        Ok(Self {
            session,
            model,
            data_source,
            queries,
            repository,
            hash_algorithm,
            loaded_users: RwLock::new(HashMap::new()),
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn model(&self) -> &ComponentModel {
        &self.model
    }

    /// Connection source shared with every provider of the same component
    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }

    pub fn query_configurations(&self) -> &Arc<QueryConfigurations> {
        &self.queries
    }

    /// Number of users loaded during this session
    pub async fn loaded_count(&self) -> usize {
        self.loaded_users.read().await.len()
    }

    async fn adopt(&self, record: UserRecord) -> FederatedUser {
        let mut loaded = self.loaded_users.write().await;

        if !self.queries.allow_database_to_overwrite_keycloak {
            if let Some(existing) = loaded.get(&record.id) {
                return existing.clone();
            }
        }

        let user = FederatedUser::from_record(&self.model.id, record);
        loaded.insert(user.external_id().to_string(), user.clone());
        user
    }

    async fn adopt_all(&self, records: Vec<UserRecord>) -> Vec<FederatedUser> {
        let mut users = Vec::with_capacity(records.len());
        for record in records {
            users.push(self.adopt(record).await);
        }
        users
    }
}

#[async_trait]
impl UserStorageProvider for DbUserStorageProvider {
    async fn users_count(&self) -> DomainResult<u64> {
        self.repository.count().await
    }

    async fn get_users(&self, page: Pageable) -> DomainResult<Vec<FederatedUser>> {
        let records = self.repository.list_all(page).await?;
        Ok(self.adopt_all(records).await)
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<FederatedUser>> {
        let storage_id = StorageId::parse(id)?;
        if let Some(owner) = storage_id.provider_id() {
            if owner != self.model.id {
                tracing::debug!(
                    component_id = %self.model.id,
                    owner = %owner,
                    "Ignoring lookup for a user owned by another component"
                );
                return Ok(None);
            }
        }

        match self.repository.find_by_id(storage_id.external_id()).await? {
            Some(record) => Ok(Some(self.adopt(record).await)),
            None => Ok(None),
        }
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<FederatedUser>> {
        match self.repository.find_by_username(username).await? {
            Some(record) => Ok(Some(self.adopt(record).await)),
            None => Ok(None),
        }
    }

    async fn search_for_user(&self, term: &str, page: Pageable) -> DomainResult<Vec<FederatedUser>> {
        let records = self.repository.search(term, page).await?;
        Ok(self.adopt_all(records).await)
    }

    fn supports_credential_type(&self, credential_type: &str) -> bool {
        credential_type == PASSWORD_CREDENTIAL
    }

    async fn is_valid(&self, user: &FederatedUser, input: &CredentialInput) -> DomainResult<bool> {
        if !self.supports_credential_type(&input.credential_type) {
            return Ok(false);
        }

        let Some(stored) = self.repository.find_password_hash(&user.username).await? else {
            tracing::debug!(username = %user.username, "No stored password hash");
            return Ok(false);
        };

        Ok(self.hash_algorithm.verify(&input.value, &stored))
    }

    async fn remove_user(&self, user: &FederatedUser) -> bool {
        if !self.queries.allow_keycloak_delete {
            return false;
        }
        self.loaded_users.write().await.remove(user.external_id());
        true
    }

    async fn close(&self) {
        self.loaded_users.write().await.clear();
    }
}
