//! Course progress handler.
//!
//! ```text
//! GET /api/v1/courses/{id}/progress
//! ```
//!
//! A user who never completed a lesson of the course has no progress record;
//! the endpoint then answers `200` with a JSON `null` body rather than `404`.

use std::collections::BTreeSet;

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Progress;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Public projection of [`Progress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub completed_lesson_ids: BTreeSet<Uuid>,
    /// Whole percent, 0 to 100.
    pub completion_percentage: u8,
    #[schema(value_type = String, format = DateTime)]
    pub started_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Progress> for ProgressResponse {
    fn from(progress: Progress) -> Self {
        Self {
            id: progress.id,
            course_id: progress.course_id,
            user_id: progress.user_id,
            completed_lesson_ids: progress.completed_lesson_ids,
            completion_percentage: progress.completion_percentage,
            started_at: progress.started_at,
            updated_at: progress.updated_at,
            completed_at: progress.completed_at,
        }
    }
}

/// The signed-in user's progress through a course, or `null`.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/progress",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Progress, or null when not started", body = Option<ProgressResponse>),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getProgress"
)]
#[get("/courses/{id}/progress")]
pub async fn get_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<ProgressResponse>>> {
    let user_id = session.require_user_id()?;
    let progress = state
        .progress
        .get_progress(&path.into_inner(), &user_id)
        .await?;
    Ok(web::Json(progress.map(Into::into)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{id, progress};
    use crate::inbound::http::test_utils::{created_course, send, signed_up, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn mapper_preserves_every_field() {
        let entity = progress(id(500), id(1), &[id(10), id(11)], 50);
        let response = ProgressResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.course_id, entity.course_id);
        assert_eq!(response.user_id, entity.user_id);
        assert_eq!(response.completed_lesson_ids, entity.completed_lesson_ids);
        assert_eq!(response.completion_percentage, entity.completion_percentage);
        assert_eq!(response.started_at, entity.started_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.completed_at, entity.completed_at);
    }

    #[actix_web::test]
    async fn missing_progress_is_null() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "learner@example.com").await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/courses/00000000-0000-0000-0000-000000000500/progress")
                .cookie(cookie),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[actix_web::test]
    async fn completing_a_lesson_starts_progress() {
        let app = actix_test::init_service(test_app()).await;
        let (user_id, cookie) = signed_up(&app, "learner@example.com").await;
        let (course_id, lessons) = created_course(&app, &cookie, 2).await;

        let (status, _) = send(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/lessons/{}/complete", lessons[0]))
                .cookie(cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/courses/{course_id}/progress"))
                .cookie(cookie),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], user_id.to_string());
        assert_eq!(body["completionPercentage"], 50);
        assert_eq!(body["completedLessonIds"][0], lessons[0].to_string());
    }

    #[actix_web::test]
    async fn malformed_course_id_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "learner@example.com").await;
        let (status, body) = send(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/courses/nope/progress")
                .cookie(cookie),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }
}
