//! PostgreSQL-backed `NotificationRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{NotificationRepository, RepositoryError};
use crate::domain::{Notification, PageRequest};
use crate::query_optional;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::NotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn create(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(notifications::table)
            .values(&NotificationRow::from(notification))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Notification>, RepositoryError> {
        query_optional!(
            self,
            notifications::table,
            notifications::id.eq(*id),
            NotificationRow,
            Notification::try_from
        )
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = notifications::table
            .filter(notifications::user_id.eq(*user_id))
            .select(NotificationRow::as_select())
            .into_boxed();
        if unread_only {
            query = query.filter(notifications::read_at.is_null());
        }

        let rows: Vec<NotificationRow> = query
            .order_by((notifications::created_at.desc(), notifications::id.asc()))
            .limit(i64::from(page.limit()))
            .offset(i64::from(page.offset()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn mark_read(&self, id: &Uuid, read_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(*id))
                .filter(notifications::read_at.is_null()),
        )
        .set(notifications::read_at.eq(Some(read_at)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn mark_all_read(
        &self,
        user_id: &Uuid,
        read_at: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(*user_id))
                .filter(notifications::read_at.is_null()),
        )
        .set(notifications::read_at.eq(Some(read_at)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(u64::try_from(updated).unwrap_or(u64::MAX))
    }
}
