//! Connection source traits.
//!
//! A `DataSource` owns the pooled connections for one provider configuration.
//! The factory builds one per component through a `DataSourceBuilder` and
//! closes it when the configuration is replaced or the factory shuts down.

use async_trait::async_trait;
use dbup_shared::{ConnectionSettings, Rdbms};
use std::sync::Arc;

use crate::domain::value_objects::QueryConfigurations;
use crate::errors::DomainError;
use crate::repositories::user::UserRepository;

/// Pooled connection source for one provider configuration
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Display name given at construction
    fn name(&self) -> &str;

    /// Dialect the source was configured for
    fn rdbms(&self) -> Rdbms;

    /// Repository that runs `queries` over this source's connections
    fn user_repository(&self, queries: Arc<QueryConfigurations>) -> Arc<dyn UserRepository>;

    /// Whether `close` has been called
    fn is_closed(&self) -> bool;

    /// Close every pooled connection
    ///
    /// Waits for checked-out connections to be returned.
    async fn close(&self);
}

/// Builds connection sources from resolved settings
pub trait DataSourceBuilder: Send + Sync {
    /// Build a source for `settings`, named `display_name`
    ///
    /// Building does not need the database to be reachable.
    fn build(
        &self,
        settings: &ConnectionSettings,
        display_name: &str,
    ) -> Result<Arc<dyn DataSource>, DomainError>;
}
