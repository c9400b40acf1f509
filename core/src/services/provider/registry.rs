//! Explicit lookup table of provider factories.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};

use super::spi::UserStorageProviderFactory;

/// Factories keyed by id, filled once at process start
#[derive(Default)]
pub struct ProviderRegistry {
    factories: HashMap<&'static str, Arc<dyn UserStorageProviderFactory>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under its id and run its `init` hook
    pub fn register(&mut self, factory: Arc<dyn UserStorageProviderFactory>) -> DomainResult<()> {
        let id = factory.id();
        if self.factories.contains_key(id) {
            return Err(DomainError::DuplicateFactory { id: id.to_string() });
        }

        factory.init();
        tracing::info!(factory_id = %id, "Registered user storage provider factory");
        self.factories.insert(id, factory);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn UserStorageProviderFactory>> {
        self.factories.get(id).cloned()
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Close every registered factory
    pub async fn close_all(&self) {
        for (id, factory) in &self.factories {
            tracing::debug!(factory_id = %id, "Closing factory");
            factory.close().await;
        }
    }
}
