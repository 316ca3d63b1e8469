//! PostgreSQL-backed `CheckoutRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::CheckoutSession;
use crate::domain::ports::{CheckoutRepository, RepositoryError};
use crate::query_optional;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CheckoutSessionRow;
use super::pool::DbPool;
use super::schema::checkout_sessions;

/// Diesel-backed implementation of the `CheckoutRepository` port.
#[derive(Clone)]
pub struct DieselCheckoutRepository {
    pool: DbPool,
}

impl DieselCheckoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckoutRepository for DieselCheckoutRepository {
    async fn create(&self, session: &CheckoutSession) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(checkout_sessions::table)
            .values(&CheckoutSessionRow::from(session))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CheckoutSession>, RepositoryError> {
        query_optional!(
            self,
            checkout_sessions::table,
            checkout_sessions::id.eq(*id),
            CheckoutSessionRow,
            CheckoutSession::try_from
        )
    }

    async fn update(&self, session: &CheckoutSession) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(checkout_sessions::table.find(session.id))
            .set(&CheckoutSessionRow::from(session))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
