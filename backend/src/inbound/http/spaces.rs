//! Space handlers.
//!
//! ```text
//! POST   /api/v1/communities/{id}/spaces {"name":"General","visibility":"public"}
//! GET    /api/v1/communities/{id}/spaces
//! GET    /api/v1/spaces/{id}
//! PATCH  /api/v1/spaces/{id}
//! DELETE /api/v1/spaces/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Error, NewSpace, Space, SpaceChanges, SpaceVisibility};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_label, parse_uuid, validated,
};

const ID: FieldName = FieldName::new("id");
const VISIBILITY: FieldName = FieldName::new("visibility");

/// Public projection of a [`Space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpaceResponse {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// `public` or `private`.
    pub visibility: String,
    pub position: u32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Space> for SpaceResponse {
    fn from(space: Space) -> Self {
        Self {
            id: space.id,
            community_id: space.community_id,
            name: space.name,
            slug: space.slug,
            description: space.description,
            visibility: space.visibility.as_str().to_owned(),
            position: space.position,
            created_at: space.created_at,
            updated_at: space.updated_at,
            deleted_at: space.deleted_at,
        }
    }
}

/// Body of `POST /api/v1/communities/{id}/spaces`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpaceSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Defaults to `public`.
    pub visibility: Option<String>,
}

impl CreateSpaceSchema {
    fn into_new_space(self, community_id: Uuid) -> Result<NewSpace, Error> {
        let visibility = parse_optional_label(self.visibility.as_deref(), VISIBILITY)?
            .unwrap_or(SpaceVisibility::Public);
        Ok(NewSpace {
            community_id,
            name: self.name,
            description: self.description,
            visibility,
        })
    }
}

/// Body of `PATCH /api/v1/spaces/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpaceSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub position: Option<u32>,
}

impl TryFrom<UpdateSpaceSchema> for SpaceChanges {
    type Error = Error;

    fn try_from(schema: UpdateSpaceSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            name: schema.name,
            description: schema.description,
            visibility: parse_optional_label(schema.visibility.as_deref(), VISIBILITY)?,
            position: schema.position,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/spaces",
    params(("id" = String, Path, description = "Community identifier")),
    request_body = CreateSpaceSchema,
    responses(
        (status = 201, description = "Space created", body = SpaceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Community not found", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["spaces"],
    operation_id = "createSpace"
)]
#[post("/communities/{id}/spaces")]
pub async fn create_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateSpaceSchema>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let input = validated(payload.into_inner())?.into_new_space(community_id)?;
    let space = state.spaces.create_space(&actor_id, input).await?;
    Ok(HttpResponse::Created().json(SpaceResponse::from(space)))
}

/// Spaces of a community ordered by position.
#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/spaces",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 200, description = "Spaces", body = [SpaceResponse]),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["spaces"],
    operation_id = "listSpaces"
)]
#[get("/communities/{id}/spaces")]
pub async fn list_spaces(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<SpaceResponse>>> {
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let spaces = state.spaces.list_spaces(&community_id).await?;
    Ok(web::Json(spaces.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/spaces/{id}",
    params(("id" = String, Path, description = "Space identifier")),
    responses(
        (status = 200, description = "Space", body = SpaceResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["spaces"],
    operation_id = "getSpace"
)]
#[get("/spaces/{id}")]
pub async fn get_space(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<SpaceResponse>> {
    let space = state.spaces.get_space(&path.into_inner()).await?;
    Ok(web::Json(space.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/spaces/{id}",
    params(("id" = String, Path, description = "Space identifier")),
    request_body = UpdateSpaceSchema,
    responses(
        (status = 200, description = "Updated space", body = SpaceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["spaces"],
    operation_id = "updateSpace"
)]
#[patch("/spaces/{id}")]
pub async fn update_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateSpaceSchema>,
) -> ApiResult<web::Json<SpaceResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let changes = SpaceChanges::try_from(validated(payload.into_inner())?)?;
    let space = state.spaces.update_space(&actor_id, &id, changes).await?;
    Ok(web::Json(space.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/spaces/{id}",
    params(("id" = String, Path, description = "Space identifier")),
    responses(
        (status = 204, description = "Space deleted"),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["spaces"],
    operation_id = "deleteSpace"
)]
#[delete("/spaces/{id}")]
pub async fn delete_space(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.spaces.delete_space(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
