//! User entities read from the external database.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::StorageId;

/// One row of the `users` table as returned by the lookup statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// External (database) identifier
    pub id: String,

    /// Login name
    pub username: String,

    /// Email address, if the row has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRecord {
    /// Creates a new UserRecord instance
    pub fn new(id: impl Into<String>, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email,
        }
    }

    /// Whether the username contains `term`, ignoring case
    ///
    /// Mirrors `upper(username) like upper('%term%')`.
    pub fn username_matches(&self, term: &str) -> bool {
        self.username.to_uppercase().contains(&term.to_uppercase())
    }
}

/// A database user as presented to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedUser {
    /// Host-side identifier
    pub storage_id: StorageId,

    /// Login name
    pub username: String,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Component the user was loaded through
    pub federation_link: String,
}

impl FederatedUser {
    /// Wrap a record loaded through `component_id`
    pub fn from_record(component_id: &str, record: UserRecord) -> Self {
        Self {
            storage_id: StorageId::new(component_id, record.id),
            username: record.username,
            email: record.email,
            federation_link: component_id.to_string(),
        }
    }

    /// External (database) identifier
    pub fn external_id(&self) -> &str {
        self.storage_id.external_id()
    }

    /// Host-side identifier as a string
    pub fn id(&self) -> String {
        self.storage_id.to_string()
    }
}
