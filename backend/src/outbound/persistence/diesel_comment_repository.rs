//! PostgreSQL-backed `CommentRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Comment;
use crate::domain::ports::{CommentRepository, RepositoryError};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CommentRow;
use super::pool::DbPool;
use super::schema::comments;

diesel::define_sql_function!(fn greatest(a: Integer, b: Integer) -> Integer);

/// Diesel-backed implementation of the `CommentRepository` port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(comments::table)
            .values(&CommentRow::from(comment))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Comment>, RepositoryError> {
        query_optional!(
            self,
            comments::table,
            comments::id.eq(*id).and(comments::deleted_at.is_null()),
            CommentRow,
            Comment::try_from
        )
    }

    async fn find_by_post_id(&self, post_id: &Uuid) -> Result<Vec<Comment>, RepositoryError> {
        query_vec!(
            self,
            comments::table,
            comments::post_id
                .eq(*post_id)
                .and(comments::deleted_at.is_null()),
            (comments::created_at.asc(), comments::id.asc()),
            CommentRow,
            Comment::try_from
        )
    }

    async fn update(&self, comment: &Comment) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            comments::table
                .filter(comments::id.eq(comment.id))
                .filter(comments::deleted_at.is_null()),
        )
        .set(&CommentRow::from(comment))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, comments, *id, deleted_at)
    }

    async fn adjust_reply_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(comments::table.filter(comments::id.eq(*id)))
            .set(comments::reply_count.eq(greatest(comments::reply_count + delta, 0)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
