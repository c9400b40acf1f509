//! Host-side identifiers for federated users.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const FEDERATED_PREFIX: &str = "f:";

/// Identifier of the form `f:<component id>:<external id>`
///
/// An identifier without the `f:` prefix carries only an external id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StorageId {
    provider_id: Option<String>,
    external_id: String,
}

impl StorageId {
    /// Identifier for `external_id` owned by `provider_id`
    pub fn new(provider_id: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            provider_id: Some(provider_id.into()),
            external_id: external_id.into(),
        }
    }

    /// Parse a host-side identifier
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidStorageId {
            value: value.to_string(),
        };

        let Some(rest) = value.strip_prefix(FEDERATED_PREFIX) else {
            if value.is_empty() {
                return Err(invalid());
            }
            return Ok(Self {
                provider_id: None,
                external_id: value.to_string(),
            });
        };

        // The external id may itself contain ':'
        let (provider_id, external_id) = rest.split_once(':').ok_or_else(invalid)?;
        if provider_id.is_empty() || external_id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(provider_id, external_id))
    }

    /// Owning component, if any
    pub fn provider_id(&self) -> Option<&str> {
        self.provider_id.as_deref()
    }

    /// External (database) identifier
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    /// Whether the identifier is owned by `component_id`
    pub fn is_owned_by(&self, component_id: &str) -> bool {
        self.provider_id.as_deref() == Some(component_id)
    }
}

impl std::fmt::Display for StorageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.provider_id {
            Some(provider_id) => write!(f, "{}{}:{}", FEDERATED_PREFIX, provider_id, self.external_id),
            None => write!(f, "{}", self.external_id),
        }
    }
}

impl std::str::FromStr for StorageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StorageId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StorageId> for String {
    fn from(id: StorageId) -> Self {
        id.to_string()
    }
}
