//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::test_fixtures::fixture_clock;
use crate::inbound::http::routes::api_scope;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::in_memory_repositories;
use crate::outbound::security::{Argon2PasswordHasher, HmacWebhookVerifier};

pub(crate) const WEBHOOK_SECRET: &[u8] = b"test-webhook-secret";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a fresh in-memory store and the fixture clock.
pub(crate) fn memory_state() -> HttpState {
    HttpState::from_repositories(
        in_memory_repositories(),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(HmacWebhookVerifier::new(WEBHOOK_SECRET.to_vec())),
        fixture_clock(),
    )
}

/// Full API surface over [`memory_state`], without the session guard.
pub(crate) fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(memory_state()))
        .wrap(test_session_middleware())
        .service(api_scope())
}

/// Extract the session cookie set by a response.
pub(crate) fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Send a request and decode the JSON body; empty bodies read as `null`.
pub(crate) async fn send<S, B>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, body)
}

/// Register an account and return its id with the session cookie.
pub(crate) async fn signed_up<S, B>(app: &S, email: &str) -> (Uuid, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/sign-up")
            .set_json(json!({
                "email": email,
                "password": "correct horse battery",
                "displayName": "Tester",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "sign-up for {email}");
    let cookie = session_cookie(&response);
    let body: Value = actix_test::read_body_json(response).await;
    let id = body["id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .expect("user id in sign-up response");
    (id, cookie)
}

/// Create a community as the cookie's user and return its id.
pub(crate) async fn created_community<S, B>(app: &S, cookie: &Cookie<'static>, name: &str) -> Uuid
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/communities")
            .cookie(cookie.clone())
            .set_json(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create community {name}: {body}");
    id_of(&body)
}

/// Read the `id` of a JSON resource.
pub(crate) fn id_of(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .expect("resource id")
}

/// Create a community with one space and one channel; returns the channel id.
pub(crate) async fn created_channel<S, B>(app: &S, cookie: &Cookie<'static>) -> Uuid
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let community_id = created_community(app, cookie, "Rust Guild").await;
    let (status, space) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/communities/{community_id}/spaces"))
            .cookie(cookie.clone())
            .set_json(json!({ "name": "General" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create space: {space}");
    let (status, channel) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/spaces/{}/channels", id_of(&space)))
            .cookie(cookie.clone())
            .set_json(json!({ "name": "lobby" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create channel: {channel}");
    id_of(&channel)
}

/// Publish a post in `channel_id` as the cookie's user; returns the post id.
pub(crate) async fn created_post<S, B>(app: &S, cookie: &Cookie<'static>, channel_id: Uuid) -> Uuid
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, post) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/channels/{channel_id}/posts"))
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Borrowing", "content": "Shared or mutable, never both." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post: {post}");
    id_of(&post)
}

/// Create a community with one published course holding `lessons` lessons.
///
/// Returns the course id and the lesson ids in position order.
pub(crate) async fn created_course<S, B>(
    app: &S,
    cookie: &Cookie<'static>,
    lessons: usize,
) -> (Uuid, Vec<Uuid>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let community_id = created_community(app, cookie, "Rust Academy").await;
    let (status, course) = send(
        app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/communities/{community_id}/courses"))
            .cookie(cookie.clone())
            .set_json(json!({ "title": "Ownership 101" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create course: {course}");
    let course_id = id_of(&course);
    let (status, published) = send(
        app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "status": "published" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "publish course: {published}");

    let mut lesson_ids = Vec::with_capacity(lessons);
    for n in 0..lessons {
        let (status, lesson) = send(
            app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}/lessons"))
                .cookie(cookie.clone())
                .set_json(json!({ "title": format!("Lesson {n}"), "content": "Moves and borrows." })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "create lesson: {lesson}");
        lesson_ids.push(id_of(&lesson));
    }
    (course_id, lesson_ids)
}
