//! Driving port for course progress.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Progress;

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of progress use cases.
    pub enum ProgressError {
        InvalidInput { message: String } => "invalid progress input: {message}" as InvalidRequest,
        LessonNotFound => "lesson not found" as NotFound,
        CourseNotFound => "course not found" as NotFound,
        CourseUnavailable => "course is not published" as Conflict,
        TierRequired => "course requires a membership tier the learner does not hold" as Forbidden,
    }
}

/// Progress use cases.
#[async_trait]
pub trait ProgressUseCases: Send + Sync {
    /// Progress of `user_id` in a course; `None` when the user never started.
    async fn get_progress(
        &self,
        course_id: &str,
        user_id: &Uuid,
    ) -> Result<Option<Progress>, ProgressError>;

    /// Mark a lesson as completed and return the updated progress.
    ///
    /// Only published courses accept completions. A course with a required
    /// tier also needs the learner's membership to hold that tier.
    async fn complete_lesson(
        &self,
        user_id: &Uuid,
        lesson_id: &Uuid,
    ) -> Result<Progress, ProgressError>;
}
