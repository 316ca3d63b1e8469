//! PostgreSQL-backed `ContentVersionRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ContentVersion;
use crate::domain::ports::{ContentVersionRepository, RepositoryError};
use crate::query_vec;

use super::diesel_helpers::{map_diesel_error, map_pool_error, u32_from_db};
use super::models::ContentVersionRow;
use super::pool::DbPool;
use super::schema::content_versions;

/// Diesel-backed implementation of the `ContentVersionRepository` port.
#[derive(Clone)]
pub struct DieselContentVersionRepository {
    pool: DbPool,
}

impl DieselContentVersionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentVersionRepository for DieselContentVersionRepository {
    async fn create(&self, version: &ContentVersion) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(content_versions::table)
            .values(&ContentVersionRow::from(version))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_content_id(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<ContentVersion>, RepositoryError> {
        query_vec!(
            self,
            content_versions::table,
            content_versions::content_id.eq(*content_id),
            content_versions::version.asc(),
            ContentVersionRow,
            ContentVersion::try_from
        )
    }

    async fn latest_version(&self, content_id: &Uuid) -> Result<Option<u32>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let latest: Option<i32> = content_versions::table
            .filter(content_versions::content_id.eq(*content_id))
            .select(diesel::dsl::max(content_versions::version))
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        latest
            .map(|version| u32_from_db(version, "content_versions.version"))
            .transpose()
    }
}
