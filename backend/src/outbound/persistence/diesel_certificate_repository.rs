//! PostgreSQL-backed `CertificateRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Certificate;
use crate::domain::ports::{CertificateRepository, RepositoryError};
use crate::{query_optional, query_vec};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CertificateRow;
use super::pool::DbPool;
use super::schema::certificates;

/// Diesel-backed implementation of the `CertificateRepository` port.
#[derive(Clone)]
pub struct DieselCertificateRepository {
    pool: DbPool,
}

impl DieselCertificateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CertificateRepository for DieselCertificateRepository {
    async fn create(&self, certificate: &Certificate) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(certificates::table)
            .values(&CertificateRow::from(certificate))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Certificate>, RepositoryError> {
        query_optional!(
            self,
            certificates::table,
            certificates::id.eq(*id),
            CertificateRow,
            |row| Ok(Certificate::from(row))
        )
    }

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Certificate>, RepositoryError> {
        query_optional!(
            self,
            certificates::table,
            certificates::course_id
                .eq(*course_id)
                .and(certificates::user_id.eq(*user_id)),
            CertificateRow,
            |row| Ok(Certificate::from(row))
        )
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Certificate>, RepositoryError> {
        query_optional!(
            self,
            certificates::table,
            certificates::verification_code.eq(code),
            CertificateRow,
            |row| Ok(Certificate::from(row))
        )
    }

    async fn find_by_user_id(&self, user_id: &Uuid) -> Result<Vec<Certificate>, RepositoryError> {
        query_vec!(
            self,
            certificates::table,
            certificates::user_id.eq(*user_id),
            (certificates::issued_at.desc(), certificates::id.asc()),
            CertificateRow,
            |row| Ok(Certificate::from(row))
        )
    }
}
