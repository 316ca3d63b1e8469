//! Forum posts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A post published in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub community_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub comment_count: u32,
    pub like_count: u32,
    pub pinned: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Whether `user_id` wrote this post.
    pub fn is_authored_by(&self, user_id: &Uuid) -> bool {
        self.author_id == *user_id
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub channel_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Partial update of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
}
