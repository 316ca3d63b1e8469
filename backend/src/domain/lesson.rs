//! Lessons within a course.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One lesson of a course, ordered by `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub position: u32,
    pub duration_minutes: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a lesson. A missing position appends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub position: Option<u32>,
    pub duration_minutes: Option<u32>,
}

/// Partial update of a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub position: Option<u32>,
    pub duration_minutes: Option<u32>,
}
