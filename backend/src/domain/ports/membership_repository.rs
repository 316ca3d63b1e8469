//! Driven port for community memberships.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Membership, PageRequest};

use super::RepositoryError;

/// Storage for memberships.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert a membership. A live duplicate pair yields
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, membership: &Membership) -> Result<(), RepositoryError>;

    /// Fetch the live membership of `user_id` in `community_id`.
    async fn find(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Membership>, RepositoryError>;

    /// Members of a community ordered by join time.
    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Membership>, RepositoryError>;

    /// Overwrite role and tier of an existing membership.
    async fn update(&self, membership: &Membership) -> Result<(), RepositoryError>;

    /// Soft delete by membership id.
    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
