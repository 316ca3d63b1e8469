//! Courses and their lessons.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// Publication state of a course.
    pub enum CourseStatus {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

/// A course offered by a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: CourseStatus,
    /// Tier a member needs before enrolling, if restricted.
    pub required_tier_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub community_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub required_tier_id: Option<Uuid>,
}

/// Partial update of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: Option<CourseStatus>,
    pub required_tier_id: Option<Uuid>,
}
