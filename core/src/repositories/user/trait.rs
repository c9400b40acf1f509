//! User repository trait defining read access to the external user table.
//!
//! The provider never writes to the external database. Every method maps to
//! exactly one of the statements in `QueryConfigurations`.

use async_trait::async_trait;
use dbup_shared::Pageable;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

/// Read-only repository over the external `users` table
///
/// # Example
/// ```no_run
/// # use dbup_core::repositories::UserRepository;
/// # use dbup_shared::Pageable;
/// # async fn example(repo: &dyn UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// let total = repo.count().await?;
/// let first_page = repo.list_all(Pageable::new(0, 20)).await?;
/// println!("{} of {} users", first_page.len(), total);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Count all users
    async fn count(&self) -> Result<u64, DomainError>;

    /// List users inside the requested window
    async fn list_all(&self, page: Pageable) -> Result<Vec<UserRecord>, DomainError>;

    /// Find a user by external id
    ///
    /// # Returns
    /// * `Ok(Some(UserRecord))` - User found
    /// * `Ok(None)` - No row with that id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Find users whose username contains `term`, ignoring case
    ///
    /// `term` is the raw search text; implementations add the wildcards.
    async fn search(&self, term: &str, page: Pageable) -> Result<Vec<UserRecord>, DomainError>;

    /// Stored password digest for `username`
    ///
    /// # Returns
    /// * `Ok(Some(hash))` - Hex digest as stored
    /// * `Ok(None)` - Unknown user or no stored hash
    /// * `Err(DomainError)` - Database error occurred
    async fn find_password_hash(&self, username: &str) -> Result<Option<String>, DomainError>;
}
