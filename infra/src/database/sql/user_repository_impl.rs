//! SQL implementation of the UserRepository trait.
//!
//! Runs the statements from `QueryConfigurations` over an `AnyPool`,
//! rendering them for the configured dialect first.

use async_trait::async_trait;
use dbup_core::domain::entities::UserRecord;
use dbup_core::domain::value_objects::QueryConfigurations;
use dbup_core::errors::DomainError;
use dbup_core::repositories::UserRepository;
use dbup_shared::{Pageable, Rdbms};
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row, ValueRef};
use std::sync::Arc;

use crate::database::dialect::SqlDialect;

/// Bind value for a single-row lookup key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyParameter<'a> {
    Integer(i64),
    Text(&'a str),
}

impl<'a> KeyParameter<'a> {
    /// How `key` is bound for `rdbms`
    pub(crate) fn for_dialect(rdbms: Rdbms, key: &'a str) -> Self {
        if rdbms.binds_integer_keys() {
            if let Ok(value) = key.parse::<i64>() {
                return KeyParameter::Integer(value);
            }
        }
        KeyParameter::Text(key)
    }
}

/// SQL implementation of UserRepository
pub struct SqlUserRepository {
    /// Database connection pool
    pool: AnyPool,
    /// Statements and dialect
    queries: Arc<QueryConfigurations>,
}

impl SqlUserRepository {
    pub fn new(pool: AnyPool, queries: Arc<QueryConfigurations>) -> Self {
        Self { pool, queries }
    }

    fn statement(&self, sql: &str, page: Pageable) -> String {
        self.queries.rdbms.render(sql, page)
    }

    /// Convert database row to UserRecord
    fn row_to_user(row: &AnyRow) -> Result<UserRecord, DomainError> {
        Ok(UserRecord {
            id: Self::row_id(row)?,
            username: row
                .try_get("username")
                .map_err(|e| column_error("username", e))?,
            email: nullable_text(row, "email")?,
        })
    }

    /// Text ids are kept, integer ids are stringified
    fn row_id(row: &AnyRow) -> Result<String, DomainError> {
        if let Ok(id) = row.try_get::<String, _>("id") {
            return Ok(id);
        }
        if let Ok(id) = row.try_get::<i64, _>("id") {
            return Ok(id.to_string());
        }
        row.try_get::<i32, _>("id")
            .map(|id| id.to_string())
            .map_err(|e| column_error("id", e))
    }

    async fn fetch_users(
        &self,
        sql: String,
        parameter: String,
    ) -> Result<Vec<UserRecord>, DomainError> {
        tracing::debug!(statement = %sql, "Executing user query");

        let rows = sqlx::query(&sql)
            .bind(parameter)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Database query failed: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn fetch_row(&self, sql: &str, key: KeyParameter<'_>) -> Result<Option<AnyRow>, sqlx::Error> {
        let sql = self.statement(sql, Pageable::all());
        tracing::debug!(statement = %sql, key = ?key, "Executing user query");

        let query = sqlx::query(&sql);
        let query = match key {
            KeyParameter::Integer(value) => query.bind(value),
            KeyParameter::Text(value) => query.bind(value),
        };
        query.fetch_optional(&self.pool).await
    }

    async fn fetch_user(&self, sql: &str, key: &str) -> Result<Option<UserRecord>, DomainError> {
        let parameter = KeyParameter::for_dialect(self.queries.rdbms, key);

        let row = match self.fetch_row(sql, parameter).await {
            Ok(row) => row,
            // a text key column rejects the integer parameter; compare as text instead
            Err(sqlx::Error::Database(e)) if matches!(parameter, KeyParameter::Integer(_)) => {
                tracing::debug!(error = %e, "Integer key rejected, retrying as text");
                self.fetch_row(sql, KeyParameter::Text(key))
                    .await
                    .map_err(query_failed)?
            }
            Err(e) => return Err(query_failed(e)),
        };

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn count(&self) -> Result<u64, DomainError> {
        let sql = self.statement(&self.queries.count, Pageable::all());
        tracing::debug!(statement = %sql, "Counting users");

        let row = sqlx::query(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count users: {}", e)))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| DomainError::database(format!("Failed to get count: {}", e)))?;

        Ok(count.max(0) as u64)
    }

    async fn list_all(&self, page: Pageable) -> Result<Vec<UserRecord>, DomainError> {
        let sql = self.statement(&self.queries.list_all, page);
        tracing::debug!(statement = %sql, "Listing users");

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list users: {}", e)))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DomainError> {
        self.fetch_user(&self.queries.find_by_id, id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        let row = self
            .fetch_row(&self.queries.find_by_username, KeyParameter::Text(username))
            .await
            .map_err(query_failed)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn search(&self, term: &str, page: Pageable) -> Result<Vec<UserRecord>, DomainError> {
        let sql = self.statement(&self.queries.find_by_search_term, page);
        self.fetch_users(sql, format!("%{}%", term)).await
    }

    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, DomainError> {
        let row = self
            .fetch_row(&self.queries.find_password_hash, KeyParameter::Text(username))
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch password hash: {}", e)))?;

        match row {
            Some(row) => nullable_text(&row, "hash_pwd"),
            None => Ok(None),
        }
    }
}

/// Text column that may hold NULL
///
/// The `Any` driver refuses to decode NULL into `Option<String>`, so the raw
/// value is checked first.
fn nullable_text(row: &AnyRow, column: &str) -> Result<Option<String>, DomainError> {
    let value = row.try_get_raw(column).map_err(|e| column_error(column, e))?;
    if value.is_null() {
        return Ok(None);
    }

    row.try_get::<String, _>(column)
        .map(Some)
        .map_err(|e| column_error(column, e))
}

fn column_error(column: &str, error: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to get {}: {}", column, error))
}

fn query_failed(error: sqlx::Error) -> DomainError {
    DomainError::database(format!("Database query failed: {}", error))
}
