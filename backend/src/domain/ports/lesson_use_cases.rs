//! Driving port for lessons.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ContentVersion, Lesson, LessonChanges, NewLesson};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of lesson use cases.
    pub enum LessonError {
        InvalidInput { message: String } => "invalid lesson input: {message}" as InvalidRequest,
        NotFound => "lesson not found" as NotFound,
        CourseNotFound => "course not found" as NotFound,
        NotPermitted => "only community owners and admins may manage lessons" as Forbidden,
    }
}

/// Lesson use cases.
#[async_trait]
pub trait LessonUseCases: Send + Sync {
    /// Add a lesson and record the first version of its content. Lesson
    /// writes require an owner or admin of the course's community.
    async fn create_lesson(&self, editor_id: &Uuid, input: NewLesson)
    -> Result<Lesson, LessonError>;

    /// Fetch a lesson; a missing lesson is [`LessonError::NotFound`].
    async fn get_lesson(&self, id: &str) -> Result<Lesson, LessonError>;

    async fn list_lessons(&self, course_id: &Uuid) -> Result<Vec<Lesson>, LessonError>;

    /// Apply changes; a content change appends a version.
    async fn update_lesson(
        &self,
        editor_id: &Uuid,
        id: &Uuid,
        changes: LessonChanges,
    ) -> Result<Lesson, LessonError>;

    async fn delete_lesson(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), LessonError>;

    async fn list_lesson_versions(&self, id: &Uuid) -> Result<Vec<ContentVersion>, LessonError>;
}
