//! Driving port for notifications.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Notification, PageRequest};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of notification use cases.
    pub enum NotificationError {
        InvalidInput { message: String } => "invalid notification input: {message}" as InvalidRequest,
        NotFound => "notification not found" as NotFound,
    }
}

/// Notification use cases.
#[async_trait]
pub trait NotificationUseCases: Send + Sync {
    async fn list_notifications(
        &self,
        user_id: &Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, NotificationError>;

    /// Mark one of the user's notifications as read.
    async fn mark_read(&self, user_id: &Uuid, id: &Uuid) -> Result<Notification, NotificationError>;

    /// Mark everything read; returns the number of notifications changed.
    async fn mark_all_read(&self, user_id: &Uuid) -> Result<u64, NotificationError>;
}
