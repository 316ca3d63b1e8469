//! Driven port for content revision history.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ContentVersion;

use super::RepositoryError;

/// Append-only storage for content versions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentVersionRepository: Send + Sync {
    /// Append a version. A reused `(content_id, version)` pair yields
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, version: &ContentVersion) -> Result<(), RepositoryError>;

    /// Versions of one content item, oldest first.
    async fn find_by_content_id(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<ContentVersion>, RepositoryError>;

    /// Highest version number recorded, if any.
    async fn latest_version(&self, content_id: &Uuid) -> Result<Option<u32>, RepositoryError>;
}
