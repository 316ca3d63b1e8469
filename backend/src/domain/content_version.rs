//! Revision history for editable content.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Which kind of record a version belongs to.
    pub enum ContentKind {
        Post => "post",
        Lesson => "lesson",
    }
}

/// Snapshot of a post or lesson body at one point in time.
///
/// Versions for a given content id are numbered from 1 without gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentVersion {
    pub id: Uuid,
    pub content_id: Uuid,
    pub content_kind: ContentKind,
    pub version: u32,
    pub title: Option<String>,
    pub body: String,
    pub editor_id: Uuid,
    pub created_at: DateTime<Utc>,
}
