//! Notification inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{NotificationError, NotificationRepository, NotificationUseCases};
use crate::domain::{Notification, PageRequest};

/// Store `notification`. Failures are logged and never reach the caller.
pub(crate) async fn deliver<N>(notifications: &N, notification: Notification)
where
    N: NotificationRepository + ?Sized,
{
    if let Err(error) = notifications.create(&notification).await {
        tracing::warn!(
            %error,
            user_id = %notification.user_id,
            kind = %notification.kind,
            "failed to store notification"
        );
    }
}

/// Notification service implementing [`NotificationUseCases`].
pub struct NotificationService<N: ?Sized> {
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N: ?Sized> NotificationService<N> {
    pub fn new(notifications: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl<N> NotificationUseCases for NotificationService<N>
where
    N: NotificationRepository + ?Sized,
{
    async fn list_notifications(
        &self,
        user_id: &Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, NotificationError> {
        Ok(self
            .notifications
            .find_by_user_id(user_id, unread_only, page)
            .await?)
    }

    async fn mark_read(
        &self,
        user_id: &Uuid,
        id: &Uuid,
    ) -> Result<Notification, NotificationError> {
        let mut notification = self
            .notifications
            .find_by_id(id)
            .await?
            // Other users' notifications are indistinguishable from missing ones.
            .filter(|notification| notification.user_id == *user_id)
            .ok_or_else(NotificationError::not_found)?;
        if notification.is_read() {
            return Ok(notification);
        }

        let now = self.clock.utc();
        self.notifications.mark_read(id, now).await?;
        notification.read_at = Some(now);
        Ok(notification)
    }

    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, NotificationError> {
        Ok(self
            .notifications
            .mark_all_read(user_id, self.clock.utc())
            .await?)
    }
}

#[cfg(test)]
#[path = "notification_service_tests.rs"]
mod tests;
