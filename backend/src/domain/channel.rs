//! Channels hold the posts of a space.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Conversation style of a channel.
    pub enum ChannelKind {
        Discussion => "discussion",
        Announcement => "announcement",
        Chat => "chat",
    }
}

/// A feed of posts inside a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Uuid,
    pub space_id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: ChannelKind,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub space_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: ChannelKind,
}

/// Partial update of a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ChannelKind>,
    pub position: Option<u32>,
}
