//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every `/api/v1` path, the probes and the banner, plus
//! the request schemas and response DTOs they reference. The shared error
//! payload comes from [`crate::inbound::http::schemas`] so domain types stay
//! free of utoipa derives.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{SignInSchema, SignUpSchema};
use crate::inbound::http::certificates::CertificateResponse;
use crate::inbound::http::channels::{ChannelResponse, CreateChannelSchema, UpdateChannelSchema};
use crate::inbound::http::comments::{
    CommentResponse, CommentThreadResponse, CreateCommentSchema, UpdateCommentSchema,
};
use crate::inbound::http::communities::{
    CommunityResponse, CreateCommunitySchema, MembershipResponse, UpdateCommunitySchema,
};
use crate::inbound::http::courses::{CourseResponse, CreateCourseSchema, UpdateCourseSchema};
use crate::inbound::http::health::BannerResponse;
use crate::inbound::http::lessons::{CreateLessonSchema, LessonResponse, UpdateLessonSchema};
use crate::inbound::http::notifications::{MarkAllReadResponse, NotificationResponse};
use crate::inbound::http::payments::{
    CheckoutSessionResponse, CreateTierSchema, PaymentTierResponse, UpdateTierSchema,
};
use crate::inbound::http::posts::{
    ContentVersionResponse, CreatePostSchema, PostResponse, UpdatePostSchema,
};
use crate::inbound::http::progress::ProgressResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::search::{SearchHitResponse, SearchResultsResponse};
use crate::inbound::http::spaces::{CreateSpaceSchema, SpaceResponse, UpdateSpaceSchema};
use crate::inbound::http::users::{UpdateProfileSchema, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/sign-in or /api/v1/auth/sign-up.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Commons API",
        description = "Multi-tenant community platform: forums, courses, payments and notifications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::health::banner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::delete_current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::communities::create_community,
        crate::inbound::http::communities::get_community,
        crate::inbound::http::communities::update_community,
        crate::inbound::http::communities::delete_community,
        crate::inbound::http::communities::join_community,
        crate::inbound::http::communities::list_members,
        crate::inbound::http::communities::leave_community,
        crate::inbound::http::spaces::create_space,
        crate::inbound::http::spaces::list_spaces,
        crate::inbound::http::spaces::get_space,
        crate::inbound::http::spaces::update_space,
        crate::inbound::http::spaces::delete_space,
        crate::inbound::http::channels::create_channel,
        crate::inbound::http::channels::list_channels,
        crate::inbound::http::channels::get_channel,
        crate::inbound::http::channels::update_channel,
        crate::inbound::http::channels::delete_channel,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::list_post_versions,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::lessons::create_lesson,
        crate::inbound::http::lessons::list_lessons,
        crate::inbound::http::lessons::get_lesson,
        crate::inbound::http::lessons::update_lesson,
        crate::inbound::http::lessons::delete_lesson,
        crate::inbound::http::lessons::list_lesson_versions,
        crate::inbound::http::lessons::complete_lesson,
        crate::inbound::http::progress::get_progress,
        crate::inbound::http::certificates::issue_certificate,
        crate::inbound::http::certificates::verify_certificate,
        crate::inbound::http::certificates::get_certificate,
        crate::inbound::http::certificates::list_my_certificates,
        crate::inbound::http::payments::create_tier,
        crate::inbound::http::payments::list_tiers,
        crate::inbound::http::payments::get_tier,
        crate::inbound::http::payments::update_tier,
        crate::inbound::http::payments::delete_tier,
        crate::inbound::http::payments::start_checkout,
        crate::inbound::http::payments::get_checkout,
        crate::inbound::http::payments::payment_webhook,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::notifications::mark_all_read,
        crate::inbound::http::search::search,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        BannerResponse,
        SignUpSchema,
        SignInSchema,
        UserResponse,
        UpdateProfileSchema,
        CommunityResponse,
        MembershipResponse,
        CreateCommunitySchema,
        UpdateCommunitySchema,
        SpaceResponse,
        CreateSpaceSchema,
        UpdateSpaceSchema,
        ChannelResponse,
        CreateChannelSchema,
        UpdateChannelSchema,
        PostResponse,
        ContentVersionResponse,
        CreatePostSchema,
        UpdatePostSchema,
        CommentResponse,
        CommentThreadResponse,
        CreateCommentSchema,
        UpdateCommentSchema,
        CourseResponse,
        CreateCourseSchema,
        UpdateCourseSchema,
        LessonResponse,
        CreateLessonSchema,
        UpdateLessonSchema,
        ProgressResponse,
        CertificateResponse,
        PaymentTierResponse,
        CheckoutSessionResponse,
        CreateTierSchema,
        UpdateTierSchema,
        NotificationResponse,
        MarkAllReadResponse,
        SearchHitResponse,
        SearchResultsResponse,
    )),
    tags(
        (name = "health", description = "Banner and health probes"),
        (name = "auth", description = "Sign-up, sign-in and sign-out"),
        (name = "users", description = "Profiles"),
        (name = "communities", description = "Communities and memberships"),
        (name = "spaces", description = "Spaces inside a community"),
        (name = "channels", description = "Channels inside a space"),
        (name = "posts", description = "Posts and their revisions"),
        (name = "comments", description = "Threaded comments on posts"),
        (name = "courses", description = "Courses"),
        (name = "lessons", description = "Lessons and completion"),
        (name = "progress", description = "Course progress"),
        (name = "certificates", description = "Course certificates"),
        (name = "payments", description = "Tiers, checkout and provider webhooks"),
        (name = "notifications", description = "Notification inbox"),
        (name = "search", description = "Community search")
    )
)]
pub struct ApiDoc;
