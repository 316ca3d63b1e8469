//! Driven port for comments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Comment;

use super::RepositoryError;

/// Storage for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Comment>, RepositoryError>;

    /// Every live comment of a post, in no particular order.
    async fn find_by_post_id(&self, post_id: &Uuid) -> Result<Vec<Comment>, RepositoryError>;

    async fn update(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;

    /// Add `delta` to the reply counter, saturating at zero.
    async fn adjust_reply_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError>;
}
