//! Contract between the host and a user storage plugin.

use async_trait::async_trait;
use dbup_shared::Pageable;

use crate::domain::entities::FederatedUser;
use crate::domain::value_objects::{ComponentModel, ConfigProperty, CredentialInput, SessionContext};
use crate::errors::{ComponentValidationError, DomainResult};

/// Per-session user lookups
#[async_trait]
pub trait UserStorageProvider: Send + Sync {
    /// Total number of users in the store
    async fn users_count(&self) -> DomainResult<u64>;

    /// Users inside the requested window
    async fn get_users(&self, page: Pageable) -> DomainResult<Vec<FederatedUser>>;

    /// Look a user up by host-side or external id
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<FederatedUser>>;

    /// Look a user up by exact username
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<FederatedUser>>;

    /// Users whose username contains `term`, ignoring case
    async fn search_for_user(&self, term: &str, page: Pageable) -> DomainResult<Vec<FederatedUser>>;

    /// Whether `credential_type` can be validated by this provider
    fn supports_credential_type(&self, credential_type: &str) -> bool;

    /// Check a credential presented for `user`
    async fn is_valid(&self, user: &FederatedUser, input: &CredentialInput) -> DomainResult<bool>;

    /// Whether the host may drop its link to `user`
    async fn remove_user(&self, user: &FederatedUser) -> bool;

    /// End of session
    async fn close(&self);
}

/// Lifecycle hooks the host drives for one plugin type
#[async_trait]
pub trait UserStorageProviderFactory: Send + Sync {
    /// Identifier the factory is registered under
    fn id(&self) -> &'static str;

    /// Properties the host lets administrators edit
    fn config_properties(&self) -> Vec<ConfigProperty> {
        Vec::new()
    }

    /// Called once when the factory is registered
    fn init(&self) {}

    /// New provider for one session
    async fn create(
        &self,
        session: &SessionContext,
        model: &ComponentModel,
    ) -> DomainResult<Box<dyn UserStorageProvider>>;

    /// Re-resolve the configuration of `model`
    async fn validate_configuration(
        &self,
        session: &SessionContext,
        model: &ComponentModel,
    ) -> Result<(), ComponentValidationError>;

    /// Release everything the factory holds; called once at shutdown
    async fn close(&self);
}
