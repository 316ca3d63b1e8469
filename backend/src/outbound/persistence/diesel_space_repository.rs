//! PostgreSQL-backed `SpaceRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Space;
use crate::domain::ports::{RepositoryError, SpaceRepository};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::SpaceRow;
use super::pool::DbPool;
use super::schema::spaces;

/// Diesel-backed implementation of the `SpaceRepository` port.
#[derive(Clone)]
pub struct DieselSpaceRepository {
    pool: DbPool,
}

impl DieselSpaceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpaceRepository for DieselSpaceRepository {
    async fn create(&self, space: &Space) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(spaces::table)
            .values(&SpaceRow::from(space))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Space>, RepositoryError> {
        query_optional!(
            self,
            spaces::table,
            spaces::id.eq(*id).and(spaces::deleted_at.is_null()),
            SpaceRow,
            Space::try_from
        )
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<Space>, RepositoryError> {
        query_vec!(
            self,
            spaces::table,
            spaces::community_id
                .eq(*community_id)
                .and(spaces::deleted_at.is_null()),
            (spaces::position.asc(), spaces::created_at.asc()),
            SpaceRow,
            Space::try_from
        )
    }

    async fn update(&self, space: &Space) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            spaces::table
                .filter(spaces::id.eq(space.id))
                .filter(spaces::deleted_at.is_null()),
        )
        .set(&SpaceRow::from(space))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, spaces, *id, deleted_at)
    }
}
