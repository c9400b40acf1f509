//! SQL statements and options bound to one provider configuration.

use dbup_shared::Rdbms;
use serde::{Deserialize, Serialize};

pub const SQL_COUNT: &str = "select count(*) from users";

pub const SQL_LIST_ALL: &str = "select id, username, email from users";

pub const SQL_FIND_BY_ID: &str = "select id, username, email from users where id = ? ";

pub const SQL_FIND_BY_USERNAME: &str = "select id, username, email from users where username = ? ";

pub const SQL_FIND_BY_SEARCH_TERM: &str =
    "select id, username, email from users where upper(username) like upper(?)";

pub const FIND_HASH_PASS_BY_USERNAME: &str = "select hash_pwd from users where username = ? ";

pub const SHA_256: &str = "SHA-256";

/// Immutable bundle of the statements a provider runs
///
/// Statements are stored exactly as written, with `?` placeholders. Rendering
/// for a particular dialect happens when they are executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfigurations {
    pub count: String,
    pub list_all: String,
    pub find_by_id: String,
    pub find_by_username: String,
    pub find_by_search_term: String,
    pub find_password_hash: String,

    /// Digest identifier used to compare passwords, e.g. `SHA-256`
    pub hash_function: String,

    pub rdbms: Rdbms,

    /// Host may remove a federated user (the database row is never deleted)
    pub allow_keycloak_delete: bool,

    /// A row re-read from the database replaces the copy already loaded in the session
    pub allow_database_to_overwrite_keycloak: bool,
}

impl QueryConfigurations {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        count: impl Into<String>,
        list_all: impl Into<String>,
        find_by_id: impl Into<String>,
        find_by_username: impl Into<String>,
        find_by_search_term: impl Into<String>,
        find_password_hash: impl Into<String>,
        hash_function: impl Into<String>,
        rdbms: Rdbms,
        allow_keycloak_delete: bool,
        allow_database_to_overwrite_keycloak: bool,
    ) -> Self {
        Self {
            count: count.into(),
            list_all: list_all.into(),
            find_by_id: find_by_id.into(),
            find_by_username: find_by_username.into(),
            find_by_search_term: find_by_search_term.into(),
            find_password_hash: find_password_hash.into(),
            hash_function: hash_function.into(),
            rdbms,
            allow_keycloak_delete,
            allow_database_to_overwrite_keycloak,
        }
    }

    /// The fixed statement table used by the provider factory
    pub fn standard(rdbms: Rdbms) -> Self {
        Self::new(
            SQL_COUNT,
            SQL_LIST_ALL,
            SQL_FIND_BY_ID,
            SQL_FIND_BY_USERNAME,
            SQL_FIND_BY_SEARCH_TERM,
            FIND_HASH_PASS_BY_USERNAME,
            SHA_256,
            rdbms,
            false,
            false,
        )
    }
}
