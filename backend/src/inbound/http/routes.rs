//! Registration of every `/api/v1` handler.
//!
//! Literal segments such as `/users/me` are registered before the
//! parameterised routes they would otherwise shadow.

use actix_web::{Scope, web};

use crate::inbound::http::error::{json_config, query_config};
use crate::inbound::http::{
    auth, certificates, channels, comments, communities, courses, lessons, notifications,
    payments, posts, progress, search, spaces, users,
};

/// Path prefix shared by all versioned endpoints.
pub const API_PREFIX: &str = "/api/v1";

/// Scope holding the versioned API.
pub fn api_scope() -> Scope {
    web::scope(API_PREFIX)
        .app_data(json_config())
        .app_data(query_config())
        .service(auth::sign_up)
        .service(auth::sign_in)
        .service(auth::sign_out)
        .service(certificates::list_my_certificates)
        .service(users::current_user)
        .service(users::update_current_user)
        .service(users::delete_current_user)
        .service(users::get_user)
        .service(communities::create_community)
        .service(communities::get_community)
        .service(communities::update_community)
        .service(communities::delete_community)
        .service(communities::join_community)
        .service(communities::list_members)
        .service(communities::leave_community)
        .service(spaces::create_space)
        .service(spaces::list_spaces)
        .service(spaces::get_space)
        .service(spaces::update_space)
        .service(spaces::delete_space)
        .service(channels::create_channel)
        .service(channels::list_channels)
        .service(channels::get_channel)
        .service(channels::update_channel)
        .service(channels::delete_channel)
        .service(posts::create_post)
        .service(posts::list_posts)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(posts::list_post_versions)
        .service(comments::create_comment)
        .service(comments::list_comments)
        .service(comments::update_comment)
        .service(comments::delete_comment)
        .service(courses::create_course)
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(progress::get_progress)
        .service(certificates::issue_certificate)
        .service(certificates::verify_certificate)
        .service(certificates::get_certificate)
        .service(lessons::create_lesson)
        .service(lessons::list_lessons)
        .service(lessons::get_lesson)
        .service(lessons::update_lesson)
        .service(lessons::delete_lesson)
        .service(lessons::list_lesson_versions)
        .service(lessons::complete_lesson)
        .service(payments::create_tier)
        .service(payments::list_tiers)
        .service(payments::get_tier)
        .service(payments::update_tier)
        .service(payments::delete_tier)
        .service(payments::start_checkout)
        .service(payments::get_checkout)
        .service(payments::payment_webhook)
        .service(notifications::list_notifications)
        .service(notifications::mark_all_read)
        .service(notifications::mark_read)
        .service(search::search)
}
