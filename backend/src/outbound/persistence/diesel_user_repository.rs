//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! The password hash is written on registration and read only through
//! [`UserRepository::find_password_hash`]; profile updates never touch it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::User;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::{query_optional, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User, password_hash: &str) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(&NewUserRow::new(user, password_hash))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, RepositoryError> {
        query_optional!(
            self,
            users::table,
            users::id.eq(*id).and(users::deleted_at.is_null()),
            UserRow,
            |row| Ok(User::from(row))
        )
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        query_optional!(
            self,
            users::table,
            users::email.eq(email).and(users::deleted_at.is_null()),
            UserRow,
            |row| Ok(User::from(row))
        )
    }

    async fn find_password_hash(&self, id: &Uuid) -> Result<Option<String>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::id.eq(*id))
            .filter(users::deleted_at.is_null())
            .select(users::password_hash)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn update(&self, user: &User) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            users::table
                .filter(users::id.eq(user.id))
                .filter(users::deleted_at.is_null()),
        )
        .set(&UserUpdate::from(user))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, users, *id, deleted_at)
    }
}
