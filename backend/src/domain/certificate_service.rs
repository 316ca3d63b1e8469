//! Certificate issuance and public verification.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    CertificateError, CertificateRepository, CertificateUseCases, ProgressRepository,
};
use crate::domain::{Certificate, parse_identifier};

/// Certificate service implementing [`CertificateUseCases`].
pub struct CertificateService<Pr: ?Sized, Ce: ?Sized> {
    progress: Arc<Pr>,
    certificates: Arc<Ce>,
    clock: Arc<dyn Clock>,
}

impl<Pr: ?Sized, Ce: ?Sized> CertificateService<Pr, Ce> {
    pub fn new(progress: Arc<Pr>, certificates: Arc<Ce>, clock: Arc<dyn Clock>) -> Self {
        Self {
            progress,
            certificates,
            clock,
        }
    }
}

#[async_trait]
impl<Pr, Ce> CertificateUseCases for CertificateService<Pr, Ce>
where
    Pr: ProgressRepository + ?Sized,
    Ce: CertificateRepository + ?Sized,
{
    async fn issue_certificate(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Certificate, CertificateError> {
        let completed = self
            .progress
            .find_by_course_and_user(course_id, user_id)
            .await?
            .is_some_and(|progress| progress.is_complete());
        if !completed {
            return Err(CertificateError::course_incomplete());
        }
        if self
            .certificates
            .find_by_course_and_user(course_id, user_id)
            .await?
            .is_some()
        {
            return Err(CertificateError::already_issued());
        }

        let certificate = Certificate::issue(*course_id, *user_id, self.clock.utc());
        match self.certificates.create(&certificate).await {
            Ok(()) => {
                tracing::info!(
                    certificate_id = %certificate.id,
                    course_id = %course_id,
                    "certificate issued"
                );
                Ok(certificate)
            }
            Err(error) if error.is_duplicate() => Err(CertificateError::already_issued()),
            Err(error) => Err(error.into()),
        }
    }

    async fn get_certificate(&self, id: &str) -> Result<Certificate, CertificateError> {
        let id = parse_identifier(id)
            .map_err(|error| CertificateError::invalid_input(error.to_string()))?;
        self.certificates
            .find_by_id(&id)
            .await?
            .ok_or_else(CertificateError::not_found)
    }

    async fn verify_certificate(&self, code: &str) -> Result<Certificate, CertificateError> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() || !code.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(CertificateError::invalid_input(
                "verification code must be hexadecimal",
            ));
        }
        self.certificates
            .find_by_code(&code)
            .await?
            .ok_or_else(CertificateError::not_found)
    }

    async fn list_certificates(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Certificate>, CertificateError> {
        Ok(self.certificates.find_by_user_id(user_id).await?)
    }
}

#[cfg(test)]
#[path = "certificate_service_tests.rs"]
mod tests;
