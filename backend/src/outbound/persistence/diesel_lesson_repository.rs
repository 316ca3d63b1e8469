//! PostgreSQL-backed `LessonRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Lesson;
use crate::domain::ports::{LessonRepository, RepositoryError};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::LessonRow;
use super::pool::DbPool;
use super::schema::lessons;

/// Diesel-backed implementation of the `LessonRepository` port.
#[derive(Clone)]
pub struct DieselLessonRepository {
    pool: DbPool,
}

impl DieselLessonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for DieselLessonRepository {
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(lessons::table)
            .values(&LessonRow::from(lesson))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Lesson>, RepositoryError> {
        query_optional!(
            self,
            lessons::table,
            lessons::id.eq(*id).and(lessons::deleted_at.is_null()),
            LessonRow,
            Lesson::try_from
        )
    }

    async fn find_by_course_id(&self, course_id: &Uuid) -> Result<Vec<Lesson>, RepositoryError> {
        query_vec!(
            self,
            lessons::table,
            lessons::course_id
                .eq(*course_id)
                .and(lessons::deleted_at.is_null()),
            (lessons::position.asc(), lessons::created_at.asc()),
            LessonRow,
            Lesson::try_from
        )
    }

    async fn update(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            lessons::table
                .filter(lessons::id.eq(lesson.id))
                .filter(lessons::deleted_at.is_null()),
        )
        .set(&LessonRow::from(lesson))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, lessons, *id, deleted_at)
    }
}
