//! Provider factory and per-component configuration cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbup_shared::{ConnectionSettings, EnvSource, ProcessEnv};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::value_objects::{ComponentModel, QueryConfigurations, SessionContext};
use crate::errors::{ComponentValidationError, DomainResult};
use crate::repositories::{DataSource, DataSourceBuilder};

use super::db_provider::DbUserStorageProvider;
use super::spi::{UserStorageProvider, UserStorageProviderFactory};

/// Identifier the factory registers under
pub const PROVIDER_ID: &str = "singular-db-user-provider";

/// Resolved configuration for one component
pub struct ProviderConfig {
    data_source: Arc<dyn DataSource>,
    queries: Arc<QueryConfigurations>,
    resolved_at: DateTime<Utc>,
}

impl ProviderConfig {
    pub fn new(data_source: Arc<dyn DataSource>, queries: QueryConfigurations) -> Self {
        Self {
            data_source,
            queries: Arc::new(queries),
            resolved_at: Utc::now(),
        }
    }

    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }

    pub fn queries(&self) -> &Arc<QueryConfigurations> {
        &self.queries
    }

    pub fn resolved_at(&self) -> DateTime<Utc> {
        self.resolved_at
    }
}

/// Factory creating database-backed providers
///
/// Holds at most one `ProviderConfig` per component id. Configurations are
/// resolved under the cache lock, so resolution for the whole factory is
/// serialized and each id is resolved once until it is revalidated.
pub struct DbUserStorageProviderFactory {
    env: Arc<dyn EnvSource>,
    builder: Arc<dyn DataSourceBuilder>,
    instances: Mutex<HashMap<String, Arc<ProviderConfig>>>,
}

impl DbUserStorageProviderFactory {
    /// Factory reading settings from `env` and building sources with `builder`
    pub fn new(env: Arc<dyn EnvSource>, builder: Arc<dyn DataSourceBuilder>) -> Self {
        Self {
            env,
            builder,
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Factory reading the process environment
    pub fn from_env(builder: Arc<dyn DataSourceBuilder>) -> Self {
        Self::new(Arc::new(ProcessEnv), builder)
    }

    /// Cached configuration for `model`, resolving it on first use
    pub async fn provider_config(&self, model: &ComponentModel) -> DomainResult<Arc<ProviderConfig>> {
        let mut instances = self.instances.lock().await;
        if let Some(config) = instances.get(&model.id) {
            return Ok(config.clone());
        }

        let config = Arc::new(self.configure(model)?);
        instances.insert(model.id.clone(), config.clone());
        Ok(config)
    }

    /// Cached configuration for `component_id`, without resolving
    pub async fn cached_config(&self, component_id: &str) -> Option<Arc<ProviderConfig>> {
        self.instances.lock().await.get(component_id).cloned()
    }

    /// Number of cached configurations
    pub async fn cached_count(&self) -> usize {
        self.instances.lock().await.len()
    }

    /// Create the concrete provider for one session
    pub async fn create_provider(
        &self,
        session: &SessionContext,
        model: &ComponentModel,
    ) -> DomainResult<DbUserStorageProvider> {
        let config = self.provider_config(model).await?;
        DbUserStorageProvider::new(session.clone(), model.clone(), &config)
    }

    fn configure(&self, model: &ComponentModel) -> DomainResult<ProviderConfig> {
        tracing::info!(
            component_id = %model.id,
            name = %model.name,
            "Creating configuration for model"
        );

        let settings = ConnectionSettings::from_source(self.env.as_ref())?;
        let display_name = pool_display_name(&model.name, Utc::now());
        let data_source = self.builder.build(&settings, &display_name)?;
        let queries = QueryConfigurations::standard(settings.rdbms);

        Ok(ProviderConfig::new(data_source, queries))
    }
}

#[async_trait]
impl UserStorageProviderFactory for DbUserStorageProviderFactory {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn create(
        &self,
        session: &SessionContext,
        model: &ComponentModel,
    ) -> DomainResult<Box<dyn UserStorageProvider>> {
        let provider = self.create_provider(session, model).await?;
        Ok(Box::new(provider))
    }

    async fn validate_configuration(
        &self,
        _session: &SessionContext,
        model: &ComponentModel,
    ) -> Result<(), ComponentValidationError> {
        let previous = {
            let mut instances = self.instances.lock().await;
            let config = self.configure(model).map_err(|e| {
                tracing::warn!(component_id = %model.id, error = %e, "Configuration rejected");
                ComponentValidationError::from(e)
            })?;
            instances.insert(model.id.clone(), Arc::new(config))
        };

        if let Some(previous) = previous {
            tracing::info!(
                component_id = %model.id,
                data_source = %previous.data_source().name(),
                resolved_at = %previous.resolved_at(),
                "Closing replaced data source"
            );
            previous.data_source().close().await;
        }

        Ok(())
    }

    async fn close(&self) {
        let configs: Vec<Arc<ProviderConfig>> = {
            let mut instances = self.instances.lock().await;
            instances.drain().map(|(_, config)| config).collect()
        };

        for config in configs {
            config.data_source().close().await;
        }
    }
}

/// Name given to the connection pool of one component
pub(crate) fn pool_display_name(component_name: &str, at: DateTime<Utc>) -> String {
    format!("db-user-provider-{}-{}", component_name, at.format("%Y%m%d%H%M%S"))
}
