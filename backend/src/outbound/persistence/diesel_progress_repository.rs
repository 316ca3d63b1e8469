//! PostgreSQL-backed `ProgressRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Progress;
use crate::domain::ports::{ProgressRepository, RepositoryError};
use crate::query_optional;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::ProgressRow;
use super::pool::DbPool;
use super::schema::progress;

/// Diesel-backed implementation of the `ProgressRepository` port.
#[derive(Clone)]
pub struct DieselProgressRepository {
    pool: DbPool,
}

impl DieselProgressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for DieselProgressRepository {
    async fn create(&self, record: &Progress) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(progress::table)
            .values(&ProgressRow::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_course_and_user(
        &self,
        course_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Progress>, RepositoryError> {
        query_optional!(
            self,
            progress::table,
            progress::course_id
                .eq(*course_id)
                .and(progress::user_id.eq(*user_id)),
            ProgressRow,
            Progress::try_from
        )
    }

    async fn update(&self, record: &Progress) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(progress::table.find(record.id))
            .set(&ProgressRow::from(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
