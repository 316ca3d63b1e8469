//! Driven port for course progress.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Progress;

use super::RepositoryError;

/// Storage for progress records, one per course and user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert progress. A second record for the same pair yields
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, progress: &Progress) -> Result<(), RepositoryError>;

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Progress>, RepositoryError>;

    async fn update(&self, progress: &Progress) -> Result<(), RepositoryError>;
}
