//! PostgreSQL-backed `PostRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PostRepository, RepositoryError};
use crate::domain::{PageRequest, Post};
use crate::{query_optional, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::PostRow;
use super::pool::DbPool;
use super::schema::posts;

diesel::define_sql_function!(fn greatest(a: Integer, b: Integer) -> Integer);

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: &Post) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(posts::table)
            .values(&PostRow::from(post))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Post>, RepositoryError> {
        query_optional!(
            self,
            posts::table,
            posts::id.eq(*id).and(posts::deleted_at.is_null()),
            PostRow,
            Post::try_from
        )
    }

    async fn find_by_channel_id(
        &self,
        channel_id: &Uuid,
        page: PageRequest,
    ) -> Result<Vec<Post>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = posts::table
            .filter(posts::channel_id.eq(*channel_id))
            .filter(posts::deleted_at.is_null())
            .select(PostRow::as_select())
            .order_by((
                posts::pinned.desc(),
                posts::created_at.desc(),
                posts::id.asc(),
            ))
            .limit(i64::from(page.limit()))
            .offset(i64::from(page.offset()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn update(&self, post: &Post) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            posts::table
                .filter(posts::id.eq(post.id))
                .filter(posts::deleted_at.is_null()),
        )
        .set(&PostRow::from(post))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, posts, *id, deleted_at)
    }

    async fn adjust_comment_count(&self, id: &Uuid, delta: i32) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(posts::table.filter(posts::id.eq(*id)))
            .set(posts::comment_count.eq(greatest(posts::comment_count + delta, 0)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
