//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users/me
//! PATCH  /api/v1/users/me {"displayName":"Ada","bio":"Mathematician"}
//! DELETE /api/v1/users/me
//! GET    /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{ProfileChanges, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{not_blank, validated, web_url};

/// Public projection of a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            created_at: user.created_at,
            updated_at: user.updated_at,
            deleted_at: user.deleted_at,
        }
    }
}

/// Body of `PATCH /api/v1/users/me`; absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub display_name: Option<String>,
    #[validate(custom(function = "web_url"))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub bio: Option<String>,
}

impl From<UpdateProfileSchema> for ProfileChanges {
    fn from(schema: UpdateProfileSchema) -> Self {
        Self {
            display_name: schema.display_name,
            avatar_url: schema.avatar_url,
            bio: schema.bio,
        }
    }
}

/// Fetch the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.users.get_user(&user_id.to_string()).await?;
    Ok(web::Json(user.into()))
}

/// Update the signed-in user's profile.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateProfileSchema,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/me")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileSchema>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let schema = validated(payload.into_inner())?;
    let user = state.users.update_profile(&user_id, schema.into()).await?;
    Ok(web::Json(user.into()))
}

/// Soft-delete the signed-in user's account and end the session.
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteCurrentUser"
)]
#[delete("/users/me")]
pub async fn delete_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.users.delete_account(&user_id).await?;
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch another user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.get_user(&path.into_inner()).await?;
    Ok(web::Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{id, user};
    use crate::inbound::http::auth::{SignUpSchema, sign_up};
    use crate::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(memory_state()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(sign_up)
                    .service(current_user)
                    .service(update_current_user)
                    .service(delete_current_user)
                    .service(get_user),
            )
    }

    #[rstest]
    fn mapper_preserves_every_field() {
        let entity = user(id(7));
        let response = UserResponse::from(entity.clone());
        assert_eq!(response.id, entity.id);
        assert_eq!(response.email, entity.email);
        assert_eq!(response.display_name, entity.display_name);
        assert_eq!(response.avatar_url, entity.avatar_url);
        assert_eq!(response.bio, entity.bio);
        assert_eq!(response.created_at, entity.created_at);
        assert_eq!(response.updated_at, entity.updated_at);
        assert_eq!(response.deleted_at, entity.deleted_at);
    }

    #[rstest]
    fn response_serialises_camel_case() {
        let value = serde_json::to_value(UserResponse::from(user(id(7)))).expect("serialises");
        insta::assert_json_snapshot!(value, @r#"
        {
          "avatarUrl": null,
          "bio": null,
          "createdAt": "2026-03-14T09:30:00Z",
          "deletedAt": null,
          "displayName": "Ada",
          "email": "ada@example.com",
          "id": "00000000-0000-0000-0000-000000000007",
          "updatedAt": "2026-03-14T09:30:00Z"
        }
        "#);
    }

    #[actix_web::test]
    async fn profile_round_trip_for_signed_in_user() {
        let app = actix_test::init_service(test_app()).await;
        let signed_up = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/sign-up")
                .set_json(SignUpSchema {
                    email: "ada@example.com".into(),
                    password: "correct horse battery".into(),
                    display_name: "Ada".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(signed_up.status(), StatusCode::CREATED);
        let cookie = session_cookie(&signed_up);

        let patched: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/users/me")
                .cookie(cookie.clone())
                .set_json(json!({ "bio": "Analyst" }))
                .to_request(),
        )
        .await;
        assert_eq!(patched["bio"], "Analyst");
        assert_eq!(patched["displayName"], "Ada");

        let me: Value = actix_test::call_and_read_body_json(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me["bio"], "Analyst");
    }

    #[actix_web::test]
    async fn invalid_avatar_url_is_rejected() {
        let app = actix_test::init_service(test_app()).await;
        let signed_up = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/sign-up")
                .set_json(SignUpSchema {
                    email: "grace@example.com".into(),
                    password: "correct horse battery".into(),
                    display_name: "Grace".into(),
                })
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&signed_up);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .set_json(json!({ "avatarUrl": "not a url" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "avatarUrl");
    }

    #[rstest]
    #[case("/api/v1/users/not-a-uuid", StatusCode::BAD_REQUEST)]
    #[case(
        "/api/v1/users/00000000-0000-0000-0000-000000000099",
        StatusCode::NOT_FOUND
    )]
    #[actix_web::test]
    async fn get_user_maps_lookup_failures(#[case] uri: &str, #[case] status: StatusCode) {
        let app = actix_test::init_service(test_app()).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), status);
    }

    #[actix_web::test]
    async fn current_user_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users/me").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
