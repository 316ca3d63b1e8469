//! Post handlers.
//!
//! ```text
//! POST   /api/v1/channels/{id}/posts {"title":"Hello","content":"..."}
//! GET    /api/v1/channels/{id}/posts?limit=20&offset=0
//! GET    /api/v1/posts/{id}
//! PATCH  /api/v1/posts/{id} {"pinned":true}
//! DELETE /api/v1/posts/{id}
//! GET    /api/v1/posts/{id}/versions
//! ```
//!
//! Only the author may edit or delete a post. Every edit that changes the
//! title or content appends a [`ContentVersionResponse`] to its history.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{ContentVersion, NewPost, Post, PostChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, not_blank, parse_uuid, validated};

const ID: FieldName = FieldName::new("id");

/// Public projection of a [`Post`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub community_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub comment_count: u32,
    pub like_count: u32,
    pub pinned: bool,
    pub archived: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            channel_id: post.channel_id,
            community_id: post.community_id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            comment_count: post.comment_count,
            like_count: post.like_count,
            pinned: post.pinned,
            archived: post.archived,
            created_at: post.created_at,
            updated_at: post.updated_at,
            deleted_at: post.deleted_at,
        }
    }
}

/// One entry in the revision history of a post or lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentVersionResponse {
    pub id: Uuid,
    pub content_id: Uuid,
    /// `post` or `lesson`.
    pub content_kind: String,
    /// Starts at 1 and grows by one per edit.
    pub version: u32,
    pub title: Option<String>,
    pub body: String,
    pub editor_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<ContentVersion> for ContentVersionResponse {
    fn from(version: ContentVersion) -> Self {
        Self {
            id: version.id,
            content_id: version.content_id,
            content_kind: version.content_kind.as_str().to_owned(),
            version: version.version,
            title: version.title,
            body: version.body,
            editor_id: version.editor_id,
            created_at: version.created_at,
        }
    }
}

/// Body of `POST /api/v1/channels/{id}/posts`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(
        length(min = 1, max = 20000, message = "must be between 1 and 20000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

/// Body of `PATCH /api/v1/posts/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostSchema {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[validate(
        length(min = 1, max = 20000, message = "must be between 1 and 20000 characters"),
        custom(function = "not_blank")
    )]
    pub content: Option<String>,
    pub pinned: Option<bool>,
    pub archived: Option<bool>,
}

impl From<UpdatePostSchema> for PostChanges {
    fn from(schema: UpdatePostSchema) -> Self {
        Self {
            title: schema.title,
            content: schema.content,
            pinned: schema.pinned,
            archived: schema.archived,
        }
    }
}

/// Publish a post authored by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/channels/{id}/posts",
    params(("id" = String, Path, description = "Channel identifier")),
    request_body = CreatePostSchema,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Channel not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/channels/{id}/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreatePostSchema>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_user_id()?;
    let channel_id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let post = state
        .posts
        .create_post(NewPost {
            channel_id,
            author_id,
            title: schema.title,
            content: schema.content,
        })
        .await?;
    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// Posts of a channel, pinned first then newest first.
#[utoipa::path(
    get,
    path = "/api/v1/channels/{id}/posts",
    params(("id" = String, Path, description = "Channel identifier"), PageQuery),
    responses(
        (status = 200, description = "Posts", body = [PostResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Channel not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/channels/{id}/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let channel_id = parse_uuid(&path.into_inner(), ID)?;
    let page = validated(query.into_inner())?;
    let posts = state.posts.list_posts(&channel_id, page.into()).await?;
    Ok(web::Json(posts.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let post = state.posts.get_post(&path.into_inner()).await?;
    Ok(web::Json(post.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostSchema,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not permitted", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdatePostSchema>,
) -> ApiResult<web::Json<PostResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let post = state.posts.update_post(&actor_id, &id, schema.into()).await?;
    Ok(web::Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Not the author", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.posts.delete_post(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Revision history of a post, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/versions",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Versions", body = [ContentVersionResponse]),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPostVersions"
)]
#[get("/posts/{id}/versions")]
pub async fn list_post_versions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ContentVersionResponse>>> {
    let id = parse_uuid(&path.into_inner(), ID)?;
    let versions = state.posts.list_post_versions(&id).await?;
    Ok(web::Json(versions.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentKind;
    use crate::domain::test_fixtures::{channel, fixture_now, id, post, space};
    use crate::inbound::http::test_utils::{
        created_channel, created_post, send, signed_up, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn mapper_preserves_every_field() {
        let entity = post(&channel(&space(id(100))), id(1));
        let response = PostResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.channel_id, entity.channel_id);
        assert_eq!(response.community_id, entity.community_id);
        assert_eq!(response.author_id, entity.author_id);
        assert_eq!(response.title, entity.title);
        assert_eq!(response.content, entity.content);
        assert_eq!(response.comment_count, entity.comment_count);
        assert_eq!(response.like_count, entity.like_count);
        assert_eq!(response.pinned, entity.pinned);
        assert_eq!(response.archived, entity.archived);
        assert_eq!(response.created_at, entity.created_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.deleted_at, entity.deleted_at);
    }

    #[rstest]
    fn version_mapper_preserves_every_field() {
        let entity = ContentVersion {
            id: id(900),
            content_id: id(400),
            content_kind: ContentKind::Post,
            version: 2,
            title: Some("Borrowing".into()),
            body: "Shared or mutable.".into(),
            editor_id: id(1),
            created_at: fixture_now(),
        };
        let response = ContentVersionResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.content_id, entity.content_id);
        assert_eq!(response.content_kind, "post");
        assert_eq!(response.version, entity.version);
        assert_eq!(response.title, entity.title);
        assert_eq!(response.body, entity.body);
        assert_eq!(response.editor_id, entity.editor_id);
        assert_eq!(response.created_at, entity.created_at);
    }

    #[actix_web::test]
    async fn edits_append_versions() {
        let app = actix_test::init_service(test_app()).await;
        let (author, cookie) = signed_up(&app, "author@example.com").await;
        let channel_id = created_channel(&app, &cookie).await;
        let post_id = created_post(&app, &cookie, channel_id).await;
        let post_uri = format!("/api/v1/posts/{post_id}");

        let (status, updated) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&post_uri)
                .cookie(cookie.clone())
                .set_json(json!({"content": "Aliasing xor mutation."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["authorId"], author.to_string());

        let (status, _) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&post_uri)
                .cookie(cookie)
                .set_json(json!({"pinned": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, versions) = send(
            &app,
            actix_test::TestRequest::get().uri(&format!("{post_uri}/versions")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let versions = versions.as_array().expect("array").clone();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0]["version"], 1);
        assert_eq!(versions[1]["version"], 2);
        assert_eq!(versions[1]["body"], "Aliasing xor mutation.");
    }

    #[actix_web::test]
    async fn only_the_author_may_edit_or_delete() {
        let app = actix_test::init_service(test_app()).await;
        let (_, author_cookie) = signed_up(&app, "author@example.com").await;
        let (_, other_cookie) = signed_up(&app, "other@example.com").await;
        let channel_id = created_channel(&app, &author_cookie).await;
        let post_id = created_post(&app, &author_cookie, channel_id).await;
        let post_uri = format!("/api/v1/posts/{post_id}");

        let (status, _) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&post_uri)
                .cookie(other_cookie.clone())
                .set_json(json!({"title": "Hijacked"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete().uri(&post_uri).cookie(other_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete().uri(&post_uri).cookie(author_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, actix_test::TestRequest::get().uri(&post_uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn only_moderators_may_pin() {
        let app = actix_test::init_service(test_app()).await;
        let (_, owner_cookie) = signed_up(&app, "owner@example.com").await;
        let (_, author_cookie) = signed_up(&app, "author@example.com").await;
        let channel_id = created_channel(&app, &owner_cookie).await;
        let post_id = created_post(&app, &author_cookie, channel_id).await;
        let post_uri = format!("/api/v1/posts/{post_id}");

        let (status, body) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&post_uri)
                .cookie(author_cookie)
                .set_json(json!({"pinned": true})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");

        let (status, pinned) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&post_uri)
                .cookie(owner_cookie)
                .set_json(json!({"pinned": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pinned["pinned"], true);
    }

    #[actix_web::test]
    async fn listing_uses_default_paging() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "author@example.com").await;
        let channel_id = created_channel(&app, &cookie).await;
        for _ in 0..3 {
            created_post(&app, &cookie, channel_id).await;
        }

        let (status, all) = send(
            &app,
            actix_test::TestRequest::get().uri(&format!("/api/v1/channels/{channel_id}/posts")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().map(Vec::len), Some(3));

        let (_, page) = send(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/channels/{channel_id}/posts?limit=2&offset=2")),
        )
        .await;
        assert_eq!(page.as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn blank_title_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "author@example.com").await;
        let channel_id = created_channel(&app, &cookie).await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/channels/{channel_id}/posts"))
                .cookie(cookie)
                .set_json(json!({"title": "   ", "content": "body"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "title");
    }
}
