//! Host-side models handed to the provider factory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The only credential type the provider validates
pub const PASSWORD_CREDENTIAL: &str = "password";

/// One configured instance of the provider, as managed by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentModel {
    /// Host-assigned identifier, the cache key for configurations
    pub id: String,

    /// Display name, used to name the connection pool
    pub name: String,

    /// Realm the component belongs to
    #[serde(default)]
    pub realm_id: String,
}

impl ComponentModel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, realm_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            realm_id: realm_id.into(),
        }
    }
}

/// One host session; providers are created per session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub id: Uuid,
    pub realm_id: String,
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    /// Start a new session in `realm_id`
    pub fn new(realm_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            realm_id: realm_id.into(),
            started_at: Utc::now(),
        }
    }
}

/// A user-configurable property shown by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProperty {
    pub name: String,
    pub label: String,
    pub help_text: String,
    pub default_value: Option<String>,
}

/// Credential presented for validation
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialInput {
    /// Credential type, e.g. `password`
    pub credential_type: String,
    /// Raw secret as typed by the user
    pub value: String,
}

impl CredentialInput {
    /// A password credential
    pub fn password(value: impl Into<String>) -> Self {
        Self {
            credential_type: PASSWORD_CREDENTIAL.to_string(),
            value: value.into(),
        }
    }
}

impl std::fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialInput")
            .field("credential_type", &self.credential_type)
            .field("value", &"***")
            .finish()
    }
}
