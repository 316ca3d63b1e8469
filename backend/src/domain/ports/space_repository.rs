//! Driven port for spaces.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Space;

use super::RepositoryError;

/// Storage for spaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    /// Insert a space. A slug taken within the community yields
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, space: &Space) -> Result<(), RepositoryError>;

    /// Fetch a live space.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Space>, RepositoryError>;

    /// Live spaces of a community ordered by position.
    async fn find_by_community_id(&self, community_id: &Uuid)
    -> Result<Vec<Space>, RepositoryError>;

    /// Overwrite mutable fields.
    async fn update(&self, space: &Space) -> Result<(), RepositoryError>;

    /// Soft delete.
    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
