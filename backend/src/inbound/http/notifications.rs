//! Notification inbox handlers.
//!
//! ```text
//! GET  /api/v1/notifications?unreadOnly=true&limit=20&offset=0
//! POST /api/v1/notifications/{id}/read
//! POST /api/v1/notifications/read-all
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Notification, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::default_limit;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, validated};

/// Public projection of a [`Notification`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    /// `post_comment`, `comment_reply`, `course_completed` or `payment_succeeded`.
    pub kind: String,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub read_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            community_id: notification.community_id,
            kind: notification.kind.as_str().to_owned(),
            title: notification.title,
            body: notification.body,
            link: notification.link,
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

/// Query of `GET /api/v1/notifications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct NotificationQuery {
    /// Only list notifications not yet read.
    #[serde(default)]
    pub unread_only: bool,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Result of `POST /api/v1/notifications/read-all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    /// Notifications that changed from unread to read.
    pub updated: u64,
}

/// The signed-in user's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Notifications", body = [NotificationResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NotificationQuery>,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let user_id = session.require_user_id()?;
    let query = validated(query.into_inner())?;
    let notifications = state
        .notifications
        .list_notifications(
            &user_id,
            query.unread_only,
            PageRequest::new(query.limit, query.offset),
        )
        .await?;
    Ok(web::Json(notifications.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[post("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<NotificationResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let notification = state.notifications.mark_read(&user_id, &id).await?;
    Ok(web::Json(notification.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "Count of notifications marked read", body = MarkAllReadResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "markAllNotificationsRead"
)]
#[post("/notifications/read-all")]
pub async fn mark_all_read(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MarkAllReadResponse>> {
    let user_id = session.require_user_id()?;
    let updated = state.notifications.mark_all_read(&user_id).await?;
    Ok(web::Json(MarkAllReadResponse { updated }))
}
