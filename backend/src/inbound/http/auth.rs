//! Authentication handlers.
//!
//! ```text
//! POST /api/v1/auth/sign-up {"email":"ada@example.com","password":"...","displayName":"Ada"}
//! POST /api/v1/auth/sign-in {"email":"ada@example.com","password":"..."}
//! POST /api/v1/auth/sign-out
//! ```
//!
//! Successful sign-up and sign-in store the user id in the cookie session;
//! every other protected route reads it back through [`SessionContext`].

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::ports::{SignIn, SignUp};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{not_blank, validated};

/// Body of `POST /api/v1/auth/sign-up`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpSchema {
    #[validate(email(message = "must be an email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub display_name: String,
}

impl From<SignUpSchema> for SignUp {
    fn from(schema: SignUpSchema) -> Self {
        Self {
            email: schema.email,
            password: schema.password,
            display_name: schema.display_name,
        }
    }
}

/// Body of `POST /api/v1/auth/sign-in`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInSchema {
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl From<SignInSchema> for SignIn {
    fn from(schema: SignInSchema) -> Self {
        Self {
            email: schema.email,
            password: schema.password,
        }
    }
}

/// Register an account and start a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpSchema,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpSchema>,
) -> ApiResult<HttpResponse> {
    let schema = validated(payload.into_inner())?;
    let user = state.auth.sign_up(schema.into()).await?;
    session.persist_user(&user.id)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate with email and password and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInSchema,
    responses(
        (status = 200, description = "Signed in", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInSchema>,
) -> ApiResult<web::Json<UserResponse>> {
    let schema = validated(payload.into_inner())?;
    let user = state.auth.sign_in(schema.into()).await?;
    session.persist_user(&user.id)?;
    Ok(web::Json(user.into()))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/sign-out")]
pub async fn sign_out(session: SessionContext) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}
