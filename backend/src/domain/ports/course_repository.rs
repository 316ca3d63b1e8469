//! Driven port for courses.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Course;

use super::RepositoryError;

/// Storage for courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Course>, RepositoryError>;

    /// Live courses of a community, newest first.
    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<Course>, RepositoryError>;

    async fn update(&self, course: &Course) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
