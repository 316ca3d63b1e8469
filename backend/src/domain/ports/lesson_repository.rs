//! Driven port for lessons.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Lesson;

use super::RepositoryError;

/// Storage for lessons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Lesson>, RepositoryError>;

    /// Live lessons of a course ordered by position.
    async fn find_by_course_id(&self, course_id: &Uuid) -> Result<Vec<Lesson>, RepositoryError>;

    async fn update(&self, lesson: &Lesson) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
