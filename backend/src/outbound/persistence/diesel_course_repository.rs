//! PostgreSQL-backed `CourseRepository` implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::Course;
use crate::domain::ports::{CourseRepository, RepositoryError};
use crate::{query_optional, query_vec, soft_delete};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::CourseRow;
use super::pool::DbPool;
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(courses::table)
            .values(&CourseRow::from(course))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Course>, RepositoryError> {
        query_optional!(
            self,
            courses::table,
            courses::id.eq(*id).and(courses::deleted_at.is_null()),
            CourseRow,
            Course::try_from
        )
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<Course>, RepositoryError> {
        query_vec!(
            self,
            courses::table,
            courses::community_id
                .eq(*community_id)
                .and(courses::deleted_at.is_null()),
            (courses::created_at.desc(), courses::id.asc()),
            CourseRow,
            Course::try_from
        )
    }

    async fn update(&self, course: &Course) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            courses::table
                .filter(courses::id.eq(course.id))
                .filter(courses::deleted_at.is_null()),
        )
        .set(&CourseRow::from(course))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        soft_delete!(self, courses, *id, deleted_at)
    }
}
