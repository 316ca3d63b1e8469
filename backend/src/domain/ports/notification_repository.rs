//! Driven port for notifications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Notification, PageRequest};

use super::RepositoryError;

/// Storage for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, RepositoryError>;

    /// Notifications of a user, newest first.
    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, RepositoryError>;

    /// Stamp one notification as read; `false` when it was already read or
    /// does not exist.
    async fn mark_read(&self, id: &Uuid, read_at: DateTime<Utc>) -> Result<bool, RepositoryError>;

    /// Stamp every unread notification of a user; returns how many changed.
    async fn mark_all_read(
        &self,
        user_id: &Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<u64, RepositoryError>;
}
