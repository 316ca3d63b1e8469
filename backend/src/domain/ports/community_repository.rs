//! Driven port for community persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Community;

use super::RepositoryError;

/// Storage for communities. Soft-deleted rows are invisible to lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Insert a new community. A taken slug yields [`RepositoryError::Duplicate`].
    async fn create(&self, community: &Community) -> Result<(), RepositoryError>;

    /// Fetch a live community by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Community>, RepositoryError>;

    /// Fetch a live community by slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Community>, RepositoryError>;

    /// Overwrite the mutable fields of an existing community.
    async fn update(&self, community: &Community) -> Result<(), RepositoryError>;

    /// Soft delete; returns `false` when nothing live matched.
    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
