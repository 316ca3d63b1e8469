//! Driven port for certificates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Certificate;

use super::RepositoryError;

/// Storage for issued certificates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Insert a certificate. A second certificate for the same course and
    /// user yields [`RepositoryError::Duplicate`].
    async fn create(&self, certificate: &Certificate) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Certificate>, RepositoryError>;

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Certificate>, RepositoryError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, RepositoryError>;

    /// Certificates of a user, newest first.
    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Vec<Certificate>, RepositoryError>;
}
