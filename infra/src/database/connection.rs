//! Database connection pool management
//!
//! Each provider configuration owns one SQLx `AnyPool`. Pools connect lazily,
//! so building one only validates the settings; the first query opens the
//! first connection.

use async_trait::async_trait;
use dbup_core::domain::value_objects::QueryConfigurations;
use dbup_core::errors::DomainError;
use dbup_core::repositories::{DataSource, DataSourceBuilder, UserRepository};
use dbup_shared::{ConfigError, ConnectionSettings, PoolConfig, Rdbms};
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::AnyPool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::database::sql::SqlUserRepository;
use crate::InfrastructureError;

const JDBC_PREFIX: &str = "jdbc:";

/// Connection pool for one provider configuration
#[derive(Clone)]
pub struct SqlDataSource {
    /// Display name, used in logs
    name: String,
    /// Dialect the pool talks
    rdbms: Rdbms,
    /// SQLx pool over every installed driver
    pool: AnyPool,
    /// Tuning used to create this pool
    config: PoolConfig,
}

impl SqlDataSource {
    /// Create a lazily connected pool
    ///
    /// # Arguments
    /// * `settings` - Resolved connection settings
    /// * `name` - Display name of the pool
    /// * `config` - Pool tuning
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Pool or configuration error
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(
        settings: &ConnectionSettings,
        name: impl Into<String>,
        config: PoolConfig,
    ) -> Result<Self, InfrastructureError> {
        let name = name.into();
        let url = connection_url(settings)?;

        let connect_options = AnyConnectOptions::from_str(&url).map_err(|e| ConfigError::InvalidUrl {
            message: e.to_string(),
        })?;

        let pool = AnyPoolOptions::new()
            // Connection pool size
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            // Connection lifecycle
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(config.test_before_acquire)
            .connect_lazy_with(connect_options);

        tracing::info!(
            pool = %name,
            rdbms = %settings.rdbms,
            max_connections = config.max_connections,
            "Created database connection pool"
        );

        Ok(Self {
            name,
            rdbms: settings.rdbms,
            pool,
            config,
        })
    }

    /// Reference to the underlying SQLx pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Tuning the pool was created with
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Check if the database connection is healthy
    ///
    /// Performs a simple query to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        tracing::debug!(pool = %self.name, "Performing database health check");

        let result = sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(pool = %self.name, error = %e, "Database health check failed");
                InfrastructureError::Database(e)
            })?;

        let value: i64 = sqlx::Row::try_get(&result, 0).unwrap_or(0);
        if value == 1 {
            Ok(true)
        } else {
            tracing::warn!(pool = %self.name, value, "Database health check returned unexpected value");
            Ok(false)
        }
    }

    /// Current state of the connection pool
    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.config.max_connections,
        }
    }
}

#[async_trait]
impl DataSource for SqlDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rdbms(&self) -> Rdbms {
        self.rdbms
    }

    fn user_repository(&self, queries: Arc<QueryConfigurations>) -> Arc<dyn UserRepository> {
        Arc::new(SqlUserRepository::new(self.pool.clone(), queries))
    }

    fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    async fn close(&self) {
        tracing::info!(pool = %self.name, "Closing database connection pool");
        self.pool.close().await;
        tracing::info!(pool = %self.name, "Database connection pool closed");
    }
}

/// Builds `SqlDataSource`s with a fixed pool tuning
#[derive(Debug, Clone, Default)]
pub struct SqlDataSourceBuilder {
    config: PoolConfig,
}

impl SqlDataSourceBuilder {
    pub fn new(config: PoolConfig) -> Self {
        sqlx::any::install_default_drivers();
        Self { config }
    }

    /// Build the concrete source
    pub fn build_sql(
        &self,
        settings: &ConnectionSettings,
        display_name: &str,
    ) -> Result<SqlDataSource, InfrastructureError> {
        sqlx::any::install_default_drivers();
        SqlDataSource::connect_lazy(settings, display_name, self.config.clone())
    }
}

impl DataSourceBuilder for SqlDataSourceBuilder {
    fn build(
        &self,
        settings: &ConnectionSettings,
        display_name: &str,
    ) -> Result<Arc<dyn DataSource>, DomainError> {
        let source = self.build_sql(settings, display_name)?;
        Ok(Arc::new(source))
    }
}

/// Connection pool statistics
#[derive(Debug, Clone)]
pub struct PoolStatistics {
    /// Total number of connections in the pool
    pub connections: u32,
    /// Number of idle connections
    pub idle_connections: usize,
    /// Maximum allowed connections
    pub max_connections: u32,
}

impl std::fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pool Stats: {}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

/// Driver URL for `settings`
///
/// Strips a `jdbc:` prefix and checks the scheme against the dialect. For
/// server dialects the scheme is normalised and username and password are
/// injected.
pub fn connection_url(settings: &ConnectionSettings) -> Result<String, ConfigError> {
    let raw = settings.url.trim();
    let raw = match raw.get(..JDBC_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(JDBC_PREFIX) => &raw[JDBC_PREFIX.len()..],
        _ => raw,
    };

    if !settings.rdbms.uses_credentials() {
        let scheme = raw.split(':').next().unwrap_or_default();
        if !settings.rdbms.accepts_scheme(scheme) {
            return Err(scheme_mismatch(settings.rdbms, scheme));
        }
        return Ok(raw.to_string());
    }

    let mut url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        message: e.to_string(),
    })?;
    if !settings.rdbms.accepts_scheme(url.scheme()) {
        return Err(scheme_mismatch(settings.rdbms, url.scheme()));
    }

    let cannot_hold_credentials = || ConfigError::InvalidUrl {
        message: format!("URL for {} cannot carry credentials", settings.rdbms),
    };
    // sqlx only knows the canonical scheme of each driver
    url.set_scheme(settings.rdbms.url_scheme())
        .map_err(|_| ConfigError::InvalidUrl {
            message: format!("cannot rewrite scheme '{}'", url.scheme()),
        })?;
    url.set_username(&settings.username)
        .map_err(|_| cannot_hold_credentials())?;
    url.set_password(Some(settings.password.as_str()))
        .map_err(|_| cannot_hold_credentials())?;

    Ok(url.into())
}

fn scheme_mismatch(rdbms: Rdbms, scheme: &str) -> ConfigError {
    ConfigError::InvalidUrl {
        message: format!(
            "scheme '{}' does not match dialect {} (expected {})",
            scheme,
            rdbms,
            rdbms.url_scheme()
        ),
    }
}
