//! PostgreSQL-backed `ChannelRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Channel;
use crate::domain::ports::{RepositoryError, ChannelRepository};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::ChannelRow;
use super::pool::DbPool;
use super::schema::channels;

/// Diesel-backed implementation of the `ChannelRepository` port.
#[derive(Clone)]
pub struct DieselChannelRepository {
    pool: DbPool,
}

impl DieselChannelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for DieselChannelRepository {
    async fn create(&self, channel: &Channel) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(channels::table)
            .values(&ChannelRow::from(channel))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Channel>, RepositoryError> {
        query_optional!(
            self,
            channels::table,
            channels::id.eq(*id).and(channels::deleted_at.is_null()),
            ChannelRow,
            Channel::try_from
        )
    }

    async fn find_by_space_id(
        &self,
        space_id: &Uuid,
    ) -> Result<Vec<Channel>, RepositoryError> {
        query_vec!(
            self,
            channels::table,
            channels::space_id
                .eq(*space_id)
                .and(channels::deleted_at.is_null()),
            (channels::position.asc(), channels::created_at.asc()),
            ChannelRow,
            Channel::try_from
        )
    }

    async fn update(&self, channel: &Channel) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            channels::table
                .filter(channels::id.eq(channel.id))
                .filter(channels::deleted_at.is_null()),
        )
        .set(&ChannelRow::from(channel))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, channels, *id, deleted_at)
    }
}
