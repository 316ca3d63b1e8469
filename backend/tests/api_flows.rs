//! End-to-end flows through the fully wrapped application.
//!
//! Requests pass the trace middleware, the cookie session and the session
//! guard before reaching real handlers backed by the in-memory adapters.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use commons::inbound::http::health::HealthState;
use commons::inbound::http::payments::SIGNATURE_HEADER;
use commons::inbound::http::state::HttpState;
use commons::outbound::memory::in_memory_repositories;
use commons::outbound::security::{Argon2PasswordHasher, HmacWebhookVerifier};
use commons::server::{AppDependencies, build_app};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

const WEBHOOK_SECRET: &[u8] = b"integration-webhook-secret";

fn dependencies() -> AppDependencies {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::from_repositories(
            in_memory_repositories(),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(HmacWebhookVerifier::new(WEBHOOK_SECRET.to_vec())),
            Arc::new(DefaultClock),
        )),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

async fn call<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Option<Cookie<'static>>, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    (status, cookie, body)
}

async fn sign_up<S, B>(app: &S, email: &str) -> (String, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, cookie, body) = call(
        app,
        test::TestRequest::post().uri("/api/v1/auth/sign-up").set_json(json!({
            "email": email,
            "password": "correct horse battery",
            "displayName": "Member",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["id"].as_str().expect("user id").to_owned();
    (id, cookie.expect("session cookie"))
}

async fn post_json<S, B>(app: &S, cookie: &Cookie<'static>, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _, body) = call(
        app,
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(body),
    )
    .await;
    (status, body)
}

fn id(body: &Value) -> String {
    body["id"].as_str().expect("id field").to_owned()
}

#[rstest]
#[case("/")]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn public_routes_need_no_session(#[case] uri: &str) {
    let app = test::init_service(build_app(dependencies())).await;
    let (status, _, _) = call(&app, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case("/api/v1/users/me")]
#[case("/api/v1/notifications")]
#[case("/api/v1/users/me/certificates")]
#[case("/api/v1/communities/00000000-0000-0000-0000-000000000001")]
#[actix_web::test]
async fn protected_routes_reject_anonymous_requests(#[case] uri: &str) {
    let app = test::init_service(build_app(dependencies())).await;
    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["traceId"], trace_id);
}

#[actix_web::test]
async fn signed_out_sessions_lose_access() {
    let app = test::init_service(build_app(dependencies())).await;
    let (_, cookie) = sign_up(&app, "ada@example.com").await;

    let (status, _, me) = call(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");

    let (status, cleared, _) = call(
        &app,
        test::TestRequest::post().uri("/api/v1/auth/sign-out").cookie(cookie),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let mut request = test::TestRequest::get().uri("/api/v1/users/me");
    if let Some(cleared) = cleared {
        request = request.cookie(cleared);
    }
    let (status, _, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn comment_threads_stay_on_their_post() {
    let app = test::init_service(build_app(dependencies())).await;
    let (author, cookie) = sign_up(&app, "author@example.com").await;

    let (status, community) = post_json(
        &app,
        &cookie,
        "/api/v1/communities",
        json!({"name": "Rust Guild"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{community}");
    let (_, space) = post_json(
        &app,
        &cookie,
        &format!("/api/v1/communities/{}/spaces", id(&community)),
        json!({"name": "General"}),
    )
    .await;
    let (_, channel) = post_json(
        &app,
        &cookie,
        &format!("/api/v1/spaces/{}/channels", id(&space)),
        json!({"name": "lobby"}),
    )
    .await;
    let posts_uri = format!("/api/v1/channels/{}/posts", id(&channel));
    let (status, first) = post_json(
        &app,
        &cookie,
        &posts_uri,
        json!({"title": "Lifetimes", "content": "Outlives."}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    let (_, second) = post_json(
        &app,
        &cookie,
        &posts_uri,
        json!({"title": "Traits", "content": "Shared behaviour."}),
    )
    .await;

    let (status, root) = post_json(
        &app,
        &cookie,
        "/api/v1/comments",
        json!({"postId": id(&first), "authorId": author, "content": "First!"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{root}");

    let (status, misplaced) = post_json(
        &app,
        &cookie,
        "/api/v1/comments",
        json!({
            "postId": id(&second),
            "authorId": author,
            "parentId": id(&root),
            "content": "Wrong thread",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{misplaced}");

    let (status, invalid) = post_json(
        &app,
        &cookie,
        "/api/v1/comments",
        json!({"postId": "not-a-uuid", "authorId": author, "content": "hi"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid["details"]["field"], "postId");
}

#[actix_web::test]
async fn payment_webhook_is_public_but_signed() {
    let app = test::init_service(build_app(dependencies())).await;
    let (_, owner) = sign_up(&app, "owner@example.com").await;
    let (_, buyer) = sign_up(&app, "buyer@example.com").await;

    let (_, community) = post_json(
        &app,
        &owner,
        "/api/v1/communities",
        json!({"name": "Paid Guild"}),
    )
    .await;
    let (status, tier) = post_json(
        &app,
        &owner,
        &format!("/api/v1/communities/{}/tiers", id(&community)),
        json!({"name": "Pro", "priceCents": 1500, "currency": "usd"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{tier}");

    let (status, _, repriced) = call(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/tiers/{}", id(&tier)))
            .cookie(buyer.clone())
            .set_json(json!({"priceCents": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{repriced}");
    assert_eq!(repriced["code"], "forbidden");

    let (status, checkout) = post_json(
        &app,
        &buyer,
        &format!("/api/v1/tiers/{}/checkout", id(&tier)),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{checkout}");

    let event = serde_json::to_vec(&json!({
        "checkoutId": id(&checkout),
        "status": "completed",
        "providerReference": "pi_456",
    }))
    .expect("event serialises");
    let signature = HmacWebhookVerifier::new(WEBHOOK_SECRET.to_vec()).sign(&event);

    let (status, _, rejected) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/webhooks/payments")
            .insert_header(("content-type", "application/json"))
            .set_payload(event.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected["code"], "unauthorized");

    let (status, _, settled) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/webhooks/payments")
            .insert_header(("content-type", "application/json"))
            .insert_header((SIGNATURE_HEADER, signature))
            .set_payload(event),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{settled}");
    assert_eq!(settled["status"], "completed");

    let (status, _, notifications) = call(
        &app,
        test::TestRequest::get().uri("/api/v1/notifications").cookie(buyer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        notifications
            .as_array()
            .expect("array")
            .iter()
            .any(|n| n["kind"] == "payment_succeeded")
    );
}
