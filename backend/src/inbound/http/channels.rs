//! Channel handlers.
//!
//! ```text
//! POST   /api/v1/spaces/{id}/channels {"name":"announcements","kind":"announcement"}
//! GET    /api/v1/spaces/{id}/channels
//! GET    /api/v1/channels/{id}
//! PATCH  /api/v1/channels/{id}
//! DELETE /api/v1/channels/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Channel, ChannelChanges, ChannelKind, Error, NewChannel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_label, parse_uuid, validated,
};

const ID: FieldName = FieldName::new("id");
const KIND: FieldName = FieldName::new("kind");

/// Public projection of a [`Channel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: Uuid,
    pub space_id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// `discussion`, `announcement` or `chat`.
    pub kind: String,
    pub position: u32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            space_id: channel.space_id,
            community_id: channel.community_id,
            name: channel.name,
            description: channel.description,
            kind: channel.kind.as_str().to_owned(),
            position: channel.position,
            created_at: channel.created_at,
            updated_at: channel.updated_at,
            deleted_at: channel.deleted_at,
        }
    }
}

/// Body of `POST /api/v1/spaces/{id}/channels`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    /// Defaults to `discussion`.
    pub kind: Option<String>,
}

impl CreateChannelSchema {
    fn into_new_channel(self, space_id: Uuid) -> Result<NewChannel, Error> {
        let kind = parse_optional_label(self.kind.as_deref(), KIND)?
            .unwrap_or(ChannelKind::Discussion);
        Ok(NewChannel {
            space_id,
            name: self.name,
            description: self.description,
            kind,
        })
    }
}

/// Body of `PATCH /api/v1/channels/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChannelSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    pub kind: Option<String>,
    pub position: Option<u32>,
}

impl TryFrom<UpdateChannelSchema> for ChannelChanges {
    type Error = Error;

    fn try_from(schema: UpdateChannelSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            name: schema.name,
            description: schema.description,
            kind: parse_optional_label(schema.kind.as_deref(), KIND)?,
            position: schema.position,
        })
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/spaces/{id}/channels",
    params(("id" = String, Path, description = "Space identifier")),
    request_body = CreateChannelSchema,
    responses(
        (status = 201, description = "Channel created", body = ChannelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Space not found", body = ErrorSchema)
    ),
    tags = ["channels"],
    operation_id = "createChannel"
)]
#[post("/spaces/{id}/channels")]
pub async fn create_channel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateChannelSchema>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let space_id = parse_uuid(&path.into_inner(), ID)?;
    let input = validated(payload.into_inner())?.into_new_channel(space_id)?;
    let channel = state.channels.create_channel(&actor_id, input).await?;
    Ok(HttpResponse::Created().json(ChannelResponse::from(channel)))
}

#[utoipa::path(
    get,
    path = "/api/v1/spaces/{id}/channels",
    params(("id" = String, Path, description = "Space identifier")),
    responses(
        (status = 200, description = "Channels ordered by position", body = [ChannelResponse]),
        (status = 404, description = "Space not found", body = ErrorSchema)
    ),
    tags = ["channels"],
    operation_id = "listChannels"
)]
#[get("/spaces/{id}/channels")]
pub async fn list_channels(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ChannelResponse>>> {
    let space_id = parse_uuid(&path.into_inner(), ID)?;
    let channels = state.channels.list_channels(&space_id).await?;
    Ok(web::Json(channels.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel identifier")),
    responses(
        (status = 200, description = "Channel", body = ChannelResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["channels"],
    operation_id = "getChannel"
)]
#[get("/channels/{id}")]
pub async fn get_channel(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ChannelResponse>> {
    let channel = state.channels.get_channel(&path.into_inner()).await?;
    Ok(web::Json(channel.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel identifier")),
    request_body = UpdateChannelSchema,
    responses(
        (status = 200, description = "Updated channel", body = ChannelResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["channels"],
    operation_id = "updateChannel"
)]
#[patch("/channels/{id}")]
pub async fn update_channel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateChannelSchema>,
) -> ApiResult<web::Json<ChannelResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let changes = ChannelChanges::try_from(validated(payload.into_inner())?)?;
    let channel = state.channels.update_channel(&actor_id, &id, changes).await?;
    Ok(web::Json(channel.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/channels/{id}",
    params(("id" = String, Path, description = "Channel identifier")),
    responses(
        (status = 204, description = "Channel deleted"),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["channels"],
    operation_id = "deleteChannel"
)]
#[delete("/channels/{id}")]
pub async fn delete_channel(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.channels.delete_channel(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
