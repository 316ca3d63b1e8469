//! PostgreSQL-backed `PaymentTierRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::PaymentTier;
use crate::domain::ports::{PaymentTierRepository, RepositoryError};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::PaymentTierRow;
use super::pool::DbPool;
use super::schema::payment_tiers;

/// Diesel-backed implementation of the `PaymentTierRepository` port.
#[derive(Clone)]
pub struct DieselPaymentTierRepository {
    pool: DbPool,
}

impl DieselPaymentTierRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentTierRepository for DieselPaymentTierRepository {
    async fn create(&self, tier: &PaymentTier) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(payment_tiers::table)
            .values(&PaymentTierRow::from(tier))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PaymentTier>, RepositoryError> {
        query_optional!(
            self,
            payment_tiers::table,
            payment_tiers::id
                .eq(*id)
                .and(payment_tiers::deleted_at.is_null()),
            PaymentTierRow,
            PaymentTier::try_from
        )
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<PaymentTier>, RepositoryError> {
        query_vec!(
            self,
            payment_tiers::table,
            payment_tiers::community_id
                .eq(*community_id)
                .and(payment_tiers::deleted_at.is_null()),
            (payment_tiers::price_cents.asc(), payment_tiers::name.asc()),
            PaymentTierRow,
            PaymentTier::try_from
        )
    }

    async fn update(&self, tier: &PaymentTier) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            payment_tiers::table
                .filter(payment_tiers::id.eq(tier.id))
                .filter(payment_tiers::deleted_at.is_null()),
        )
        .set(&PaymentTierRow::from(tier))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, payment_tiers, *id, deleted_at)
    }
}
