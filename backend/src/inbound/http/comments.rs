//! Comment handlers.
//!
//! ```text
//! POST   /api/v1/comments {"postId":"...","authorId":"...","parentId":null,"content":"..."}
//! GET    /api/v1/posts/{id}/comments
//! PATCH  /api/v1/comments/{id} {"content":"..."}
//! DELETE /api/v1/comments/{id}
//! ```
//!
//! Comments thread one level deep: a reply names a top-level comment of the
//! same post as its parent.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Comment, CommentThread, Error, NewComment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_uuid, parse_uuid, uuid_text, validated,
};

const ID: FieldName = FieldName::new("id");

/// Public projection of a [`Comment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub like_count: u32,
    pub reply_count: u32,
    pub archived: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            parent_id: comment.parent_id,
            content: comment.content,
            like_count: comment.like_count,
            reply_count: comment.reply_count,
            archived: comment.archived,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            deleted_at: comment.deleted_at,
        }
    }
}

/// A top-level comment with its replies, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadResponse {
    pub comment: CommentResponse,
    pub replies: Vec<CommentResponse>,
}

impl From<CommentThread> for CommentThreadResponse {
    fn from(thread: CommentThread) -> Self {
        Self {
            comment: thread.comment.into(),
            replies: thread.replies.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `POST /api/v1/comments`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentSchema {
    #[validate(custom(function = "uuid_text"))]
    pub post_id: String,
    /// Must be the signed-in user.
    #[validate(custom(function = "uuid_text"))]
    pub author_id: String,
    /// Top-level comment being replied to.
    #[validate(custom(function = "uuid_text"))]
    pub parent_id: Option<String>,
    #[validate(
        length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

impl TryFrom<CreateCommentSchema> for NewComment {
    type Error = Error;

    fn try_from(schema: CreateCommentSchema) -> Result<Self, Self::Error> {
        Ok(Self {
            post_id: parse_uuid(&schema.post_id, FieldName::new("postId"))?,
            author_id: parse_uuid(&schema.author_id, FieldName::new("authorId"))?,
            parent_id: parse_optional_uuid(schema.parent_id.as_deref(), FieldName::new("parentId"))?,
            content: schema.content,
        })
    }
}

/// Body of `PATCH /api/v1/comments/{id}`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentSchema {
    #[validate(
        length(min = 1, max = 10000, message = "must be between 1 and 10000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

/// Add a comment or a reply on behalf of the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentSchema,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request or reply nesting", body = ErrorSchema),
        (status = 403, description = "Author is not the signed-in user", body = ErrorSchema),
        (status = 404, description = "Post or parent not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommentSchema>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let input = NewComment::try_from(validated(payload.into_inner())?)?;
    if input.author_id != user_id {
        return Err(Error::forbidden("authorId must be the signed-in user"));
    }
    let comment = state.comments.create_comment(input).await?;
    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/comments",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comment threads", body = [CommentThreadResponse]),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentThreadResponse>>> {
    let post_id = parse_uuid(&path.into_inner(), ID)?;
    let threads = state.comments.list_comments(&post_id).await?;
    Ok(web::Json(threads.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment identifier")),
    request_body = UpdateCommentSchema,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[patch("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCommentSchema>,
) -> ApiResult<web::Json<CommentResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let comment = state
        .comments
        .update_comment(&actor_id, &id, schema.content)
        .await?;
    Ok(web::Json(comment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment identifier")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.comments.delete_comment(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
