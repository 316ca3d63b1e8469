//! Driving port for courses.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Course, CourseChanges, NewCourse};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of course use cases.
    pub enum CourseError {
        InvalidInput { message: String } => "invalid course input: {message}" as InvalidRequest,
        NotFound => "course not found" as NotFound,
        CommunityNotFound => "community not found" as NotFound,
        NotPermitted => "only community owners and admins may manage courses" as Forbidden,
    }
}

/// Course use cases.
#[async_trait]
pub trait CourseUseCases: Send + Sync {
    /// Draft a course; the actor must manage the community.
    async fn create_course(&self, actor_id: &Uuid, input: NewCourse)
    -> Result<Course, CourseError>;

    async fn get_course(&self, id: &str) -> Result<Course, CourseError>;

    async fn list_courses(&self, community_id: &Uuid) -> Result<Vec<Course>, CourseError>;

    async fn update_course(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: CourseChanges,
    ) -> Result<Course, CourseError>;

    async fn delete_course(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), CourseError>;
}
