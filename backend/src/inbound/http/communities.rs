//! Community and membership handlers.
//!
//! ```text
//! POST   /api/v1/communities {"name":"Rust Guild","primaryColor":"#b7410e"}
//! GET    /api/v1/communities/{id}
//! PATCH  /api/v1/communities/{id}
//! DELETE /api/v1/communities/{id}
//! POST   /api/v1/communities/{id}/members
//! GET    /api/v1/communities/{id}/members?limit=20&offset=0
//! DELETE /api/v1/communities/{id}/members/me
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::{Community, CommunityChanges, Membership, NewCommunity, is_hex_color};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::PageQuery;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_uuid, rule_failure, validated, web_url,
};

const ID: FieldName = FieldName::new("id");

/// Public projection of a [`Community`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub owner_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Community> for CommunityResponse {
    fn from(community: Community) -> Self {
        Self {
            id: community.id,
            name: community.name,
            slug: community.slug,
            logo_url: community.logo_url,
            primary_color: community.primary_color,
            owner_id: community.owner_id,
            created_at: community.created_at,
            updated_at: community.updated_at,
            deleted_at: community.deleted_at,
        }
    }
}

/// Public projection of a [`Membership`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    /// One of `owner`, `admin`, `moderator`, `member`.
    pub role: String,
    pub tier_id: Option<Uuid>,
    #[schema(value_type = String, format = DateTime)]
    pub joined_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id,
            community_id: membership.community_id,
            user_id: membership.user_id,
            role: membership.role.as_str().to_owned(),
            tier_id: membership.tier_id,
            joined_at: membership.joined_at,
            updated_at: membership.updated_at,
            deleted_at: membership.deleted_at,
        }
    }
}

fn hex_color(value: &str) -> Result<(), ValidationError> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(rule_failure("hex_color", "must be a #rrggbb colour"))
    }
}

/// Body of `POST /api/v1/communities`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommunitySchema {
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(custom(function = "web_url"))]
    pub logo_url: Option<String>,
    #[validate(custom(function = "hex_color"))]
    pub primary_color: Option<String>,
}

impl From<CreateCommunitySchema> for NewCommunity {
    fn from(schema: CreateCommunitySchema) -> Self {
        Self {
            name: schema.name,
            logo_url: schema.logo_url,
            primary_color: schema.primary_color,
        }
    }
}

/// Body of `PATCH /api/v1/communities/{id}`; the slug never changes.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommunitySchema {
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub logo_url: Option<String>,
    #[validate(custom(function = "hex_color"))]
    pub primary_color: Option<String>,
}

impl From<UpdateCommunitySchema> for CommunityChanges {
    fn from(schema: UpdateCommunitySchema) -> Self {
        Self {
            name: schema.name,
            logo_url: schema.logo_url,
            primary_color: schema.primary_color,
        }
    }
}

/// Create a community owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/communities",
    request_body = CreateCommunitySchema,
    responses(
        (status = 201, description = "Community created", body = CommunityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Slug already in use", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "createCommunity"
)]
#[post("/communities")]
pub async fn create_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCommunitySchema>,
) -> ApiResult<HttpResponse> {
    let owner_id = session.require_user_id()?;
    let schema = validated(payload.into_inner())?;
    let community = state
        .communities
        .create_community(&owner_id, schema.into())
        .await?;
    Ok(HttpResponse::Created().json(CommunityResponse::from(community)))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 200, description = "Community", body = CommunityResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "getCommunity"
)]
#[get("/communities/{id}")]
pub async fn get_community(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CommunityResponse>> {
    let community = state.communities.get_community(&path.into_inner()).await?;
    Ok(web::Json(community.into()))
}

/// Update a community; only its owner may do so.
#[utoipa::path(
    patch,
    path = "/api/v1/communities/{id}",
    params(("id" = String, Path, description = "Community identifier")),
    request_body = UpdateCommunitySchema,
    responses(
        (status = 200, description = "Updated community", body = CommunityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "updateCommunity"
)]
#[patch("/communities/{id}")]
pub async fn update_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCommunitySchema>,
) -> ApiResult<web::Json<CommunityResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let community = state
        .communities
        .update_community(&actor_id, &id, schema.into())
        .await?;
    Ok(web::Json(community.into()))
}

/// Soft-delete a community; only its owner may do so.
#[utoipa::path(
    delete,
    path = "/api/v1/communities/{id}",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 204, description = "Community deleted"),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "deleteCommunity"
)]
#[delete("/communities/{id}")]
pub async fn delete_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.communities.delete_community(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Join a community as a plain member.
#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/members",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 201, description = "Joined", body = MembershipResponse),
        (status = 404, description = "Community not found", body = ErrorSchema),
        (status = 409, description = "Already a member", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "joinCommunity"
)]
#[post("/communities/{id}/members")]
pub async fn join_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let membership = state
        .memberships
        .join_community(&community_id, &user_id)
        .await?;
    Ok(HttpResponse::Created().json(MembershipResponse::from(membership)))
}

#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/members",
    params(("id" = String, Path, description = "Community identifier"), PageQuery),
    responses(
        (status = 200, description = "Members, oldest first", body = [MembershipResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "listMembers"
)]
#[get("/communities/{id}/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<MembershipResponse>>> {
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let page = validated(query.into_inner())?;
    let members = state
        .memberships
        .list_members(&community_id, page.into())
        .await?;
    Ok(web::Json(members.into_iter().map(Into::into).collect()))
}

/// Leave a community. Owners cannot leave their own community.
#[utoipa::path(
    delete,
    path = "/api/v1/communities/{id}/members/me",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 204, description = "Left the community"),
        (status = 404, description = "Not a member", body = ErrorSchema),
        (status = 409, description = "Owner cannot leave", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "leaveCommunity"
)]
#[delete("/communities/{id}/members/me")]
pub async fn leave_community(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    state
        .memberships
        .leave_community(&community_id, &user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{community, fixture_now, id};
    use crate::domain::{MemberRole, Membership as DomainMembership};
    use crate::inbound::http::test_utils::{created_community, send, signed_up, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn community_mapper_preserves_every_field() {
        let entity = community(id(1));
        let response = CommunityResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.name, entity.name);
        assert_eq!(response.slug, entity.slug);
        assert_eq!(response.logo_url, entity.logo_url);
        assert_eq!(response.primary_color, entity.primary_color);
        assert_eq!(response.owner_id, entity.owner_id);
        assert_eq!(response.created_at, entity.created_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.deleted_at, entity.deleted_at);
    }

    #[rstest]
    fn membership_mapper_renders_role_label() {
        let entity = DomainMembership::new(id(100), id(1), MemberRole::Moderator, fixture_now());
        let response = MembershipResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.community_id, entity.community_id);
        assert_eq!(response.user_id, entity.user_id);
        assert_eq!(response.role, "moderator");
        assert_eq!(response.tier_id, entity.tier_id);
        assert_eq!(response.joined_at, entity.joined_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.deleted_at, entity.deleted_at);
    }

    #[rstest]
    #[case(json!({"name": ""}), "name")]
    #[case(json!({"name": "Guild", "primaryColor": "red"}), "primaryColor")]
    #[case(json!({"name": "Guild", "logoUrl": "logo.png"}), "logoUrl")]
    #[actix_web::test]
    async fn create_rejects_invalid_fields(#[case] body: serde_json::Value, #[case] field: &str) {
        let app = actix_test::init_service(test_app()).await;
        let (_, cookie) = signed_up(&app, "owner@example.com").await;

        let (status, body) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/communities")
                .cookie(cookie)
                .set_json(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
    }

    #[actix_web::test]
    async fn owner_creates_and_updates_community() {
        let app = actix_test::init_service(test_app()).await;
        let (owner, cookie) = signed_up(&app, "owner@example.com").await;

        let (status, created) = send(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/communities")
                .cookie(cookie.clone())
                .set_json(json!({"name": "Rust Guild", "primaryColor": "#b7410e"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["slug"], "rust-guild");
        assert_eq!(created["ownerId"], owner.to_string());

        let uri = format!("/api/v1/communities/{}", created["id"].as_str().expect("id"));
        let (status, updated) = send(
            &app,
            actix_test::TestRequest::patch()
                .uri(&uri)
                .cookie(cookie)
                .set_json(json!({"name": "Rustaceans"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Rustaceans");
        assert_eq!(updated["slug"], "rust-guild");
    }

    #[actix_web::test]
    async fn only_the_owner_may_delete() {
        let app = actix_test::init_service(test_app()).await;
        let (_, owner_cookie) = signed_up(&app, "owner@example.com").await;
        let (_, other_cookie) = signed_up(&app, "other@example.com").await;
        let community_id = created_community(&app, &owner_cookie, "Rust Guild").await;
        let uri = format!("/api/v1/communities/{community_id}");

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete().uri(&uri).cookie(other_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete().uri(&uri).cookie(owner_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, actix_test::TestRequest::get().uri(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn members_join_list_and_leave() {
        let app = actix_test::init_service(test_app()).await;
        let (_, owner_cookie) = signed_up(&app, "owner@example.com").await;
        let (member, member_cookie) = signed_up(&app, "member@example.com").await;
        let community_id = created_community(&app, &owner_cookie, "Rust Guild").await;
        let members_uri = format!("/api/v1/communities/{community_id}/members");

        let (status, joined) = send(
            &app,
            actix_test::TestRequest::post()
                .uri(&members_uri)
                .cookie(member_cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(joined["role"], "member");
        assert_eq!(joined["userId"], member.to_string());

        let (status, _) = send(
            &app,
            actix_test::TestRequest::post()
                .uri(&members_uri)
                .cookie(member_cookie.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, listed) =
            send(&app, actix_test::TestRequest::get().uri(&members_uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().map(Vec::len), Some(2));

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("{members_uri}/me"))
                .cookie(member_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("{members_uri}/me"))
                .cookie(owner_cookie),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn member_listing_validates_paging() {
        let app = actix_test::init_service(test_app()).await;
        let (status, body) = send(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/communities/00000000-0000-0000-0000-000000000001/members?limit=0"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "limit");
    }
}
