//! In-memory connection sources for tests

use async_trait::async_trait;
use dbup_shared::{ConnectionSettings, Rdbms};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::value_objects::QueryConfigurations;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

use super::trait_::{DataSource, DataSourceBuilder};

/// Connection source backed by a `MockUserRepository`
pub struct MockDataSource {
    name: String,
    settings: ConnectionSettings,
    repository: MockUserRepository,
    close_calls: AtomicUsize,
}

impl MockDataSource {
    pub fn new(settings: ConnectionSettings, name: impl Into<String>, repository: MockUserRepository) -> Self {
        Self {
            name: name.into(),
            settings,
            repository,
            close_calls: AtomicUsize::new(0),
        }
    }

    /// Settings the source was built with
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// How many times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn rdbms(&self) -> Rdbms {
        self.settings.rdbms
    }

    fn user_repository(&self, _queries: Arc<QueryConfigurations>) -> Arc<dyn UserRepository> {
        Arc::new(self.repository.clone())
    }

    fn is_closed(&self) -> bool {
        self.close_calls() > 0
    }

    async fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Builder that hands out `MockDataSource`s and remembers them
#[derive(Default)]
pub struct MockDataSourceBuilder {
    repository: MockUserRepository,
    built: Mutex<Vec<Arc<MockDataSource>>>,
}

impl MockDataSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built source shares `repository`
    pub fn with_repository(repository: MockUserRepository) -> Self {
        Self {
            repository,
            built: Mutex::default(),
        }
    }

    /// Sources built so far, oldest first
    pub fn built(&self) -> Vec<Arc<MockDataSource>> {
        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DataSourceBuilder for MockDataSourceBuilder {
    fn build(
        &self,
        settings: &ConnectionSettings,
        display_name: &str,
    ) -> Result<Arc<dyn DataSource>, DomainError> {
        let source = Arc::new(MockDataSource::new(
            settings.clone(),
            display_name,
            self.repository.clone(),
        ));
        self.built
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source.clone());
        Ok(source)
    }
}
