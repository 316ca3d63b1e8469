//! PostgreSQL-backed `SearchIndex` using case-insensitive `ILIKE` matching.
//!
//! Each record kind is queried separately; hits are merged, ranked with
//! [`rank_hits`], and windowed in process so `total` counts every match.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::AsyncPgConnection;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, SearchIndex};
use crate::domain::{
    CourseStatus, SearchHit, SearchKind, SearchQuery, SearchResults, rank_hits, snippet,
};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{courses, memberships, posts, users};

type Conn<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Diesel-backed implementation of the `SearchIndex` port.
#[derive(Clone)]
pub struct DieselSearchIndex {
    pool: DbPool,
}

impl DieselSearchIndex {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// `%text%` with `LIKE` wildcards in `text` escaped.
fn contains_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

async fn post_hits(
    conn: &mut Conn<'_>,
    community_id: Uuid,
    pattern: &str,
) -> Result<Vec<SearchHit>, RepositoryError> {
    let rows: Vec<(Uuid, String, String, DateTime<Utc>)> = posts::table
        .filter(posts::community_id.eq(community_id))
        .filter(posts::deleted_at.is_null())
        .filter(posts::title.ilike(pattern).or(posts::content.ilike(pattern)))
        .select((posts::id, posts::title, posts::content, posts::created_at))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    Ok(rows
        .into_iter()
        .map(|(id, title, content, created_at)| SearchHit {
            id,
            kind: SearchKind::Posts,
            title,
            snippet: Some(snippet(&content)),
            created_at,
        })
        .collect())
}

/// Live, published courses of a community matching `pattern`.
fn published_courses(community_id: Uuid, pattern: &str) -> courses::BoxedQuery<'_, Pg> {
    courses::table
        .filter(courses::community_id.eq(community_id))
        .filter(courses::deleted_at.is_null())
        .filter(courses::status.eq(CourseStatus::Published.as_str()))
        .filter(
            courses::title
                .ilike(pattern)
                .or(courses::description.assume_not_null().ilike(pattern)),
        )
        .into_boxed()
}

async fn course_hits(
    conn: &mut Conn<'_>,
    community_id: Uuid,
    pattern: &str,
) -> Result<Vec<SearchHit>, RepositoryError> {
    let rows: Vec<(Uuid, String, Option<String>, DateTime<Utc>)> =
        published_courses(community_id, pattern)
            .select((
                courses::id,
                courses::title,
                courses::description,
                courses::created_at,
            ))
            .load(conn)
            .await
            .map_err(map_diesel_error)?;

    Ok(rows
        .into_iter()
        .map(|(id, title, description, created_at)| SearchHit {
            id,
            kind: SearchKind::Courses,
            title,
            snippet: description.as_deref().map(snippet),
            created_at,
        })
        .collect())
}

async fn member_hits(
    conn: &mut Conn<'_>,
    community_id: Uuid,
    pattern: &str,
) -> Result<Vec<SearchHit>, RepositoryError> {
    let rows: Vec<(Uuid, String, Option<String>, DateTime<Utc>)> = memberships::table
        .inner_join(users::table)
        .filter(memberships::community_id.eq(community_id))
        .filter(memberships::deleted_at.is_null())
        .filter(users::deleted_at.is_null())
        .filter(users::display_name.ilike(pattern))
        .select((
            users::id,
            users::display_name,
            users::bio,
            memberships::joined_at,
        ))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    Ok(rows
        .into_iter()
        .map(|(id, display_name, bio, joined_at)| SearchHit {
            id,
            kind: SearchKind::Members,
            title: display_name,
            snippet: bio.as_deref().map(snippet),
            created_at: joined_at,
        })
        .collect())
}

#[async_trait]
impl SearchIndex for DieselSearchIndex {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(&query.text);

        let mut hits = Vec::new();
        if query.kind.includes(SearchKind::Posts) {
            hits.extend(post_hits(&mut conn, query.community_id, &pattern).await?);
        }
        if query.kind.includes(SearchKind::Courses) {
            hits.extend(course_hits(&mut conn, query.community_id, &pattern).await?);
        }
        if query.kind.includes(SearchKind::Members) {
            hits.extend(member_hits(&mut conn, query.community_id, &pattern).await?);
        }

        rank_hits(&mut hits);
        let total = hits.len() as u64;
        Ok(SearchResults {
            hits: query.page.slice(hits),
            total,
            limit: query.page.limit(),
            offset: query.page.offset(),
        })
    }
}
