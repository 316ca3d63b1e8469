//! Driven port for posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{PageRequest, Post};

use super::RepositoryError;

/// Storage for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Post>, RepositoryError>;

    /// Live posts of a channel, pinned first, then newest first.
    async fn find_by_channel_id(
        &self,
        channel_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepositoryError>;

    async fn update(&self, post: &Post) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;

    /// Add `delta` to the comment counter, saturating at zero.
    async fn adjust_comment_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError>;
}
