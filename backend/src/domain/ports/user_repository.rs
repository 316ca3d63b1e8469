//! Driven port for user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::User;

use super::RepositoryError;

/// Storage for users and their password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user with its password hash. A taken email yields
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError>;

    /// Fetch a live user by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, RepositoryError>;

    /// Fetch a live user by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Stored password hash of a live user.
    async fn find_password_hash(&self, id: &Uuid) -> Result<Option<String>, RepositoryError>;

    /// Overwrite profile fields.
    async fn update(&self, user: &User) -> Result<(), RepositoryError>;

    /// Soft delete.
    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
