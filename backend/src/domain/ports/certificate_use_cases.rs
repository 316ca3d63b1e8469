//! Driving port for certificates.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Certificate;

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of certificate use cases.
    pub enum CertificateError {
        InvalidInput { message: String } => "invalid certificate input: {message}" as InvalidRequest,
        NotFound => "certificate not found" as NotFound,
        CourseIncomplete => "the course has not been completed" as Conflict,
        AlreadyIssued => "a certificate was already issued for this course" as Conflict,
    }
}

/// Certificate use cases.
#[async_trait]
pub trait CertificateUseCases: Send + Sync {
    /// Issue a certificate once the user's progress reaches 100%.
    async fn issue_certificate(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Certificate, CertificateError>;

    async fn get_certificate(&self, id: &str) -> Result<Certificate, CertificateError>;

    /// Look up a certificate by its public verification code.
    async fn verify_certificate(&self, code: &str) -> Result<Certificate, CertificateError>;

    async fn list_certificates(&self, user_id: &Uuid)
    -> Result<Vec<Certificate>, CertificateError>;
}
