//! PostgreSQL-backed `CommunityRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Community;
use crate::domain::ports::{CommunityRepository, RepositoryError};
use crate::{query_optional, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CommunityRow;
use super::pool::DbPool;
use super::schema::communities;

/// Diesel-backed implementation of the `CommunityRepository` port.
#[derive(Clone)]
pub struct DieselCommunityRepository {
    pool: DbPool,
}

impl DieselCommunityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for DieselCommunityRepository {
    async fn create(&self, community: &Community) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(communities::table)
            .values(&CommunityRow::from(community))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Community>, RepositoryError> {
        query_optional!(
            self,
            communities::table,
            communities::id
                .eq(*id)
                .and(communities::deleted_at.is_null()),
            CommunityRow,
            |row| Ok(Community::from(row))
        )
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Community>, RepositoryError> {
        query_optional!(
            self,
            communities::table,
            communities::slug
                .eq(slug)
                .and(communities::deleted_at.is_null()),
            CommunityRow,
            |row| Ok(Community::from(row))
        )
    }

    async fn update(&self, community: &Community) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            communities::table
                .filter(communities::id.eq(community.id))
                .filter(communities::deleted_at.is_null()),
        )
        .set(&CommunityRow::from(community))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, communities, *id, deleted_at)
    }
}
