//! Course handlers.
//!
//! ```text
//! POST   /api/v1/communities/{id}/courses {"title":"Ownership 101"}
//! GET    /api/v1/communities/{id}/courses
//! GET    /api/v1/courses/{id}
//! PATCH  /api/v1/courses/{id} {"status":"published"}
//! DELETE /api/v1/courses/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Course, CourseChanges, Error, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_label, parse_optional_uuid, parse_uuid, uuid_text,
    validated, web_url,
};

const ID: FieldName = FieldName::new("id");
const REQUIRED_TIER_ID: FieldName = FieldName::new("requiredTierId");

/// Public projection of a [`Course`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    /// `draft`, `published` or `archived`.
    pub status: String,
    pub required_tier_id: Option<Uuid>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            community_id: course.community_id,
            title: course.title,
            description: course.description,
            cover_image_url: course.cover_image_url,
            status: course.status.as_str().to_owned(),
            required_tier_id: course.required_tier_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
            deleted_at: course.deleted_at,
        }
    }
}

/// Body of `POST /api/v1/communities/{id}/courses`. New courses start as drafts.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub cover_image_url: Option<String>,
    #[validate(custom(function = "uuid_text"))]
    pub required_tier_id: Option<String>,
}

impl CreateCourseSchema {
    fn into_new_course(self, community_id: Uuid) -> Result<NewCourse, Error> {
        Ok(NewCourse {
            community_id,
            title: self.title,
            description: self.description,
            cover_image_url: self.cover_image_url,
            required_tier_id: parse_optional_uuid(self.required_tier_id.as_deref(), REQUIRED_TIER_ID)?,
        })
    }
}

/// Body of `PATCH /api/v1/courses/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub cover_image_url: Option<String>,
    pub status: Option<String>,
    #[validate(custom(function = "uuid_text"))]
    pub required_tier_id: Option<String>,
}

impl TryFrom<UpdateCourseSchema> for CourseChanges {
    type Error = Error;

    fn try_from(schema: UpdateCourseSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            title: schema.title,
            description: schema.description,
            cover_image_url: schema.cover_image_url,
            status: parse_optional_label(schema.status.as_deref(), FieldName::new("status"))?,
            required_tier_id: parse_optional_uuid(
                schema.required_tier_id.as_deref(),
                REQUIRED_TIER_ID,
            )?,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/courses",
    params(("id" = String, Path, description = "Community identifier")),
    request_body = CreateCourseSchema,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/communities/{id}/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateCourseSchema>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let input = validated(payload.into_inner())?.into_new_course(community_id)?;
    let course = state.courses.create_course(&actor_id, input).await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/courses",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 200, description = "Courses", body = [CourseResponse]),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/communities/{id}/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let courses = state.courses.list_courses(&community_id).await?;
    Ok(web::Json(courses.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course = state.courses.get_course(&path.into_inner()).await?;
    Ok(web::Json(course.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    request_body = UpdateCourseSchema,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCourseSchema>,
) -> ApiResult<web::Json<CourseResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let changes = CourseChanges::try_from(validated(payload.into_inner())?)?;
    let course = state.courses.update_course(&actor_id, &id, changes).await?;
    Ok(web::Json(course.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = String, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.courses.delete_course(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
