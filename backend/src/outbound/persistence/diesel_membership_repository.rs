//! PostgreSQL-backed `MembershipRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MembershipRepository, RepositoryError};
use crate::domain::{Membership, PageRequest};
use crate::{query_optional, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::MembershipRow;
use super::pool::DbPool;
use super::schema::memberships;

/// Diesel-backed implementation of the `MembershipRepository` port.
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn create(&self, membership: &Membership) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(memberships::table)
            .values(&MembershipRow::from(membership))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        community_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<Option<Membership>, RepositoryError> {
        query_optional!(
            self,
            memberships::table,
            memberships::community_id
                .eq(*community_id)
                .and(memberships::user_id.eq(*user_id))
                .and(memberships::deleted_at.is_null()),
            MembershipRow,
            Membership::try_from
        )
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Membership>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MembershipRow> = memberships::table
            .filter(memberships::community_id.eq(*community_id))
            .filter(memberships::deleted_at.is_null())
            .select(MembershipRow::as_select())
            .order_by((memberships::joined_at.asc(), memberships::id.asc()))
            .limit(i64::from(page.limit()))
            .offset(i64::from(page.offset()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn update(&self, membership: &Membership) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            memberships::table
                .filter(memberships::id.eq(membership.id))
                .filter(memberships::deleted_at.is_null()),
        )
        .set(&MembershipRow::from(membership))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, memberships, *id, deleted_at)
    }
}
