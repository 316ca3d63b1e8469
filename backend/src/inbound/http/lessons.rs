//! Lesson handlers.
//!
//! ```text
//! POST   /api/v1/courses/{id}/lessons {"title":"Moves","content":"..."}
//! GET    /api/v1/courses/{id}/lessons
//! GET    /api/v1/lessons/{id}
//! PATCH  /api/v1/lessons/{id}
//! DELETE /api/v1/lessons/{id}
//! GET    /api/v1/lessons/{id}/versions
//! POST   /api/v1/lessons/{id}/complete
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Lesson, LessonChanges, NewLesson};
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts::ContentVersionResponse;
use crate::inbound::http::progress::ProgressResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, not_blank, parse_uuid, validated, web_url};

const ID: FieldName = FieldName::new("id");

/// Public projection of a [`Lesson`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub position: u32,
    pub duration_minutes: Option<u32>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title,
            content: lesson.content,
            video_url: lesson.video_url,
            position: lesson.position,
            duration_minutes: lesson.duration_minutes,
            created_at: lesson.created_at,
            updated_at: lesson.updated_at,
            deleted_at: lesson.deleted_at,
        }
    }
}

/// Body of `POST /api/v1/courses/{id}/lessons`; a missing position appends.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, max = 100000, message = "must be between 1 and 100000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
    #[validate(custom(function = "web_url"))]
    pub video_url: Option<String>,
    pub position: Option<u32>,
    #[validate(range(min = 1, max = 1440, message = "must be between 1 and 1440"))]
    pub duration_minutes: Option<u32>,
}

impl CreateLessonSchema {
    fn into_new_lesson(self, course_id: Uuid) -> NewLesson {
        NewLesson {
            course_id,
            title: self.title,
            content: self.content,
            video_url: self.video_url,
            position: self.position,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Body of `PATCH /api/v1/lessons/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[validate(
        length(min = 1, max = 100000, message = "must be between 1 and 100000 characters"),
        custom(function = "not_blank")
    )]
    pub content: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub video_url: Option<String>,
    pub position: Option<u32>,
    #[validate(range(min = 1, max = 1440, message = "must be between 1 and 1440"))]
    pub duration_minutes: Option<u32>,
}

impl From<UpdateLessonSchema> for LessonChanges {
    fn from(schema: UpdateLessonSchema) -> Self {
        Self {
            title: schema.title,
            content: schema.content,
            video_url: schema.video_url,
            position: schema.position,
            duration_minutes: schema.duration_minutes,
        }
    }
}

/// Add a lesson; the signed-in user is recorded as editor of version 1.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/lessons",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = CreateLessonSchema,
    responses(
        (status = 201, description = "Lesson created", body = LessonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "createLesson"
)]
#[post("/courses/{id}/lessons")]
pub async fn create_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateLessonSchema>,
) -> ApiResult<HttpResponse> {
    let editor_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), ID)?;
    let input = validated(payload.into_inner())?.into_new_lesson(course_id);
    let lesson = state.lessons.create_lesson(&editor_id, input).await?;
    Ok(HttpResponse::Created().json(LessonResponse::from(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/lessons",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Lessons ordered by position", body = [LessonResponse]),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "listLessons"
)]
#[get("/courses/{id}/lessons")]
pub async fn list_lessons(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LessonResponse>>> {
    let course_id = parse_uuid(&path.into_inner(), ID)?;
    let lessons = state.lessons.list_lessons(&course_id).await?;
    Ok(web::Json(lessons.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}",
    params(("id" = String, Path, description = "Lesson identifier")),
    responses(
        (status = 200, description = "Lesson", body = LessonResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "getLesson"
)]
#[get("/lessons/{id}")]
pub async fn get_lesson(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LessonResponse>> {
    let lesson = state.lessons.get_lesson(&path.into_inner()).await?;
    Ok(web::Json(lesson.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/lessons/{id}",
    params(("id" = String, Path, description = "Lesson identifier")),
    request_body = UpdateLessonSchema,
    responses(
        (status = 200, description = "Updated lesson", body = LessonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "updateLesson"
)]
#[patch("/lessons/{id}")]
pub async fn update_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateLessonSchema>,
) -> ApiResult<web::Json<LessonResponse>> {
    let editor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let lesson = state
        .lessons
        .update_lesson(&editor_id, &id, schema.into())
        .await?;
    Ok(web::Json(lesson.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{id}",
    params(("id" = String, Path, description = "Lesson identifier")),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "deleteLesson"
)]
#[delete("/lessons/{id}")]
pub async fn delete_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.lessons.delete_lesson(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}/versions",
    params(("id" = String, Path, description = "Lesson identifier")),
    responses(
        (status = 200, description = "Versions, oldest first", body = [ContentVersionResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "listLessonVersions"
)]
#[get("/lessons/{id}/versions")]
pub async fn list_lesson_versions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ContentVersionResponse>>> {
    let id = parse_uuid(&path.into_inner(), ID)?;
    let versions = state.lessons.list_lesson_versions(&id).await?;
    Ok(web::Json(versions.into_iter().map(Into::into).collect()))
}

/// Mark a lesson as completed by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/lessons/{id}/complete",
    params(("id" = String, Path, description = "Lesson identifier")),
    responses(
        (status = 200, description = "Updated course progress", body = ProgressResponse),
        (status = 404, description = "Lesson not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "completeLesson"
)]
#[post("/lessons/{id}/complete")]
pub async fn complete_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProgressResponse>> {
    let user_id = session.require_user_id()?;
    let lesson_id = parse_uuid(&path.into_inner(), ID)?;
    let progress = state.progress.complete_lesson(&user_id, &lesson_id).await?;
    Ok(web::Json(progress.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{id, lesson};
    use crate::inbound::http::test_utils::{created_course, send, signed_up, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn mapper_preserves_every_field() {
        let entity = lesson(id(10), id(500), 2);
        let response = LessonResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.course_id, entity.course_id);
        assert_eq!(response.title, entity.title);
        assert_eq!(response.content, entity.content);
        assert_eq!(response.video_url, entity.video_url);
        assert_eq!(response.position, entity.position);
        assert_eq!(response.duration_minutes, entity.duration_minutes);
        assert_eq!(response.created_at, entity.created_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.deleted_at, entity.deleted_at);
    }

    #[rstest]
    #[case(json!({"title": "Moves", "content": "body", "durationMinutes": 0}), "durationMinutes")]
    #[case(json!({"title": "Moves", "content": "body", "videoUrl": "vid.mp4"}), "videoUrl")]
    #[case(json!({"title": "", "content": "body"}), "title")]
    fn invalid_lessons_fail_validation(#[case] body: serde_json::Value, #[case] field: &str) {
        let schema: CreateLessonSchema = serde_json::from_value(body).expect("deserialises");
        let error = validated(schema).expect_err("invalid");
        assert_eq!(error.details().expect("details")["field"], field);
    }

    #[actix_web::test]
    async fn lessons_are_appended_in_order() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "teacher@example.com").await;
        let (course_id, lessons) = created_course(&app, &cookie, 3).await;

        let (status, listed) = send(
            &app,
            actix_test::TestRequest::get().uri(&format!("/api/v1/courses/{course_id}/lessons")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().expect("array").clone();
        let positions: Vec<_> = listed.iter().map(|lesson| lesson["position"].clone()).collect();
        assert_eq!(positions, vec![json!(0), json!(1), json!(2)]);
        assert_eq!(listed[0]["id"], lessons[0].to_string());
    }

    #[actix_web::test]
    async fn content_edits_append_versions() {
        let app = actix_test::init_service(test_app()).await;
        let (editor, cookie) = signed_up(&app, "teacher@example.com").await;
        let (_, lessons) = created_course(&app, &cookie, 1).await;
        let lesson_uri = format!("/api/v1/lessons/{}", lessons[0]);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&lesson_uri)
                .cookie(cookie.clone())
                .set_json(json!({"content": "Borrowing rules."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, versions) = send(
            &app,
            actix_test::TestRequest::get().uri(&format!("{lesson_uri}/versions")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let versions = versions.as_array().expect("array").clone();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[1]["contentKind"], "lesson");
        assert_eq!(versions[1]["editorId"], editor.to_string());
    }

    #[actix_web::test]
    async fn students_cannot_edit_lessons() {
        let app = actix_test::init_service(test_app()).await;
        let (_, teacher) = signed_up(&app, "teacher@example.com").await;
        let (_, student) = signed_up(&app, "student@example.com").await;
        let (_, lessons) = created_course(&app, &teacher, 1).await;

        let (status, _) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/v1/lessons/{}", lessons[0]))
                .cookie(student)
                .set_json(json!({"content": "Vandalised."})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn completing_every_lesson_finishes_the_course() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "learner@example.com").await;
        let (_, lessons) = created_course(&app, &cookie, 2).await;

        let mut last = serde_json::Value::Null;
        for lesson_id in &lessons {
            let (status, body) = send(
                &app,
                actix_test::TestRequest::post()
                    .uri(&format!("/api/v1/lessons/{lesson_id}/complete"))
                    .cookie(cookie.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["completionPercentage"], 100);
        assert!(last["completedAt"].is_string());
    }

    #[actix_web::test]
    async fn completing_an_unknown_lesson_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "learner@example.com").await;
        let (status, _) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/lessons/00000000-0000-0000-0000-000000000010/complete")
                .cookie(cookie),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
