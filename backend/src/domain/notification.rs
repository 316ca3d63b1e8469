//! In-app notifications.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Event that produced a notification.
    pub enum NotificationKind {
        PostComment => "post_comment",
        CommentReply => "comment_reply",
        CourseCompleted => "course_completed",
        PaymentSucceeded => "payment_succeeded",
    }
}

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            community_id: None,
            kind,
            title: title.into(),
            body: body.into(),
            link: None,
            read_at: None,
            created_at: now,
        }
    }

    /// Attach the community the event happened in.
    #[must_use]
    pub fn in_community(mut self, community_id: Uuid) -> Self {
        self.community_id = Some(community_id);
        self
    }

    /// Attach a relative link to the subject of the notification.
    #[must_use]
    pub fn linking_to(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Whether the user has seen it.
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}
