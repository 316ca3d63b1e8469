//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Each row converts into its domain entity
//! with [`TryFrom`], failing with a query error when stored labels or
//! counters fall outside the domain's vocabulary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Certificate, Channel, CheckoutSession, Comment, Community, ContentVersion, Course, Lesson,
    Membership, Notification, PaymentTier, Post, Progress, Space, User,
};

use super::diesel_helpers::{label_from_db, u32_from_db, u32_to_db, u64_from_db, u64_to_db};
use super::schema::{
    certificates, channels, checkout_sessions, comments, communities, content_versions, courses,
    lessons, memberships, notifications, payment_tiers, posts, progress, spaces, users,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading a user without the password hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insertable struct for registering a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub avatar_url: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for profile updates; the password hash is left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub display_name: &'a str,
    pub avatar_url: Option<&'a str>,
    pub bio: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            avatar_url: row.avatar_url,
            bio: row.bio,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id,
            email: &user.email,
            display_name: &user.display_name,
            avatar_url: user.avatar_url.as_deref(),
            bio: user.bio.as_deref(),
            password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: &user.email,
            display_name: &user.display_name,
            avatar_url: user.avatar_url.as_deref(),
            bio: user.bio.as_deref(),
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Communities and memberships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = communities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CommunityRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Community> for CommunityRow {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id,
            name: community.name.clone(),
            slug: community.slug.clone(),
            logo_url: community.logo_url.clone(),
            primary_color: community.primary_color.clone(),
            owner_id: community.owner_id,
            created_at: community.created_at,
            updated_at: community.updated_at,
            deleted_at: community.deleted_at,
        }
    }
}

impl From<CommunityRow> for Community {
    fn from(row: CommunityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            logo_url: row.logo_url,
            primary_color: row.primary_color,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MembershipRow {
    pub id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub tier_id: Option<Uuid>,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Membership> for MembershipRow {
    fn from(membership: &Membership) -> Self {
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

impl TryFrom<MembershipRow> for Membership {
    type Error = RepositoryError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            community_id: row.community_id,
            user_id: row.user_id,
            role: label_from_db(&row.role)?,
            tier_id: row.tier_id,
            joined_at: row.joined_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Spaces, channels, posts, comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = spaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct SpaceRow {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub visibility: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Space> for SpaceRow {
    fn from(space: &Space) -> Self {
        Self {
            id: space.id,
            community_id: space.community_id,
            name: space.name.clone(),
            slug: space.slug.clone(),
            description: space.description.clone(),
            visibility: space.visibility.as_str().to_owned(),
            position: u32_to_db(space.position),
            created_at: space.created_at,
            updated_at: space.updated_at,
            deleted_at: space.deleted_at,
        }
    }
}

impl TryFrom<SpaceRow> for Space {
    type Error = RepositoryError;

    fn try_from(row: SpaceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            community_id: row.community_id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            visibility: label_from_db(&row.visibility)?,
            position: u32_from_db(row.position, "spaces.position")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = channels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ChannelRow {
    pub id: Uuid,
    pub space_id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Channel> for ChannelRow {
    fn from(channel: &Channel) -> Self {
        Self {
            id: channel.id,
            space_id: channel.space_id,
            community_id: channel.community_id,
            name: channel.name.clone(),
            description: channel.description.clone(),
            kind: channel.kind.as_str().to_owned(),
            position: u32_to_db(channel.position),
            created_at: channel.created_at,
            updated_at: channel.updated_at,
            deleted_at: channel.deleted_at,
        }
    }
}

impl TryFrom<ChannelRow> for Channel {
    type Error = RepositoryError;

    fn try_from(row: ChannelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            space_id: row.space_id,
            community_id: row.community_id,
            name: row.name,
            description: row.description,
            kind: label_from_db(&row.kind)?,
            position: u32_from_db(row.position, "channels.position")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub channel_id: Uuid,
    pub community_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub comment_count: i32,
    pub like_count: i32,
    pub pinned: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            channel_id: post.channel_id,
            community_id: post.community_id,
            author_id: post.author_id,
            title: post.title.clone(),
            content: post.content.clone(),
            comment_count: u32_to_db(post.comment_count),
            like_count: u32_to_db(post.like_count),
            pinned: post.pinned,
            archived: post.archived,
            created_at: post.created_at,
            updated_at: post.updated_at,
            deleted_at: post.deleted_at,
        }
    }
}

impl TryFrom<PostRow> for Post {
    type Error = RepositoryError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            channel_id: row.channel_id,
            community_id: row.community_id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            comment_count: u32_from_db(row.comment_count, "posts.comment_count")?,
            like_count: u32_from_db(row.like_count, "posts.like_count")?,
            pinned: row.pinned,
            archived: row.archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CommentRow {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub like_count: i32,
    pub reply_count: i32,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            parent_id: comment.parent_id,
            content: comment.content.clone(),
            like_count: u32_to_db(comment.like_count),
            reply_count: u32_to_db(comment.reply_count),
            archived: comment.archived,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            deleted_at: comment.deleted_at,
        }
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = RepositoryError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            post_id: row.post_id,
            author_id: row.author_id,
            parent_id: row.parent_id,
            content: row.content,
            like_count: u32_from_db(row.like_count, "comments.like_count")?,
            reply_count: u32_from_db(row.reply_count, "comments.reply_count")?,
            archived: row.archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = content_versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentVersionRow {
    pub id: Uuid,
    pub content_id: Uuid,
    pub content_kind: String,
    pub version: i32,
    pub title: Option<String>,
    pub body: String,
    pub editor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&ContentVersion> for ContentVersionRow {
    fn from(version: &ContentVersion) -> Self {
        Self {
            id: version.id,
            content_id: version.content_id,
            content_kind: version.content_kind.as_str().to_owned(),
            version: u32_to_db(version.version),
            title: version.title.clone(),
            body: version.body.clone(),
            editor_id: version.editor_id,
            created_at: version.created_at,
        }
    }
}

impl TryFrom<ContentVersionRow> for ContentVersion {
    type Error = RepositoryError;

    fn try_from(row: ContentVersionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            content_id: row.content_id,
            content_kind: label_from_db(&row.content_kind)?,
            version: u32_from_db(row.version, "content_versions.version")?,
            title: row.title,
            body: row.body,
            editor_id: row.editor_id,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Courses, lessons, progress, certificates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub community_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub status: String,
    pub required_tier_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            community_id: course.community_id,
            title: course.title.clone(),
            description: course.description.clone(),
            cover_image_url: course.cover_image_url.clone(),
            status: course.status.as_str().to_owned(),
            required_tier_id: course.required_tier_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
            deleted_at: course.deleted_at,
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = RepositoryError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            community_id: row.community_id,
            title: row.title,
            description: row.description,
            cover_image_url: row.cover_image_url,
            status: label_from_db(&row.status)?,
            required_tier_id: row.required_tier_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct LessonRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub position: i32,
    pub duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Lesson> for LessonRow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            video_url: lesson.video_url.clone(),
            position: u32_to_db(lesson.position),
            duration_minutes: lesson.duration_minutes.map(u32_to_db),
            created_at: lesson.created_at,
            updated_at: lesson.updated_at,
            deleted_at: lesson.deleted_at,
        }
    }
}

impl TryFrom<LessonRow> for Lesson {
    type Error = RepositoryError;

    fn try_from(row: LessonRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            content: row.content,
            video_url: row.video_url,
            position: u32_from_db(row.position, "lessons.position")?,
            duration_minutes: row
                .duration_minutes
                .map(|minutes| u32_from_db(minutes, "lessons.duration_minutes"))
                .transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProgressRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub completed_lesson_ids: Vec<Uuid>,
    pub completion_percentage: i16,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Progress> for ProgressRow {
    fn from(record: &Progress) -> Self {
        Self {
            id: record.id,
            course_id: record.course_id,
            user_id: record.user_id,
            completed_lesson_ids: record.completed_lesson_ids.iter().copied().collect(),
            completion_percentage: i16::from(record.completion_percentage),
            started_at: record.started_at,
            updated_at: record.updated_at,
            completed_at: record.completed_at,
        }
    }
}

impl TryFrom<ProgressRow> for Progress {
    type Error = RepositoryError;

    fn try_from(row: ProgressRow) -> Result<Self, Self::Error> {
        let completion_percentage = u8::try_from(row.completion_percentage)
            .ok()
            .filter(|percentage| *percentage <= 100)
            .ok_or_else(|| RepositoryError::query("progress.completion_percentage out of range"))?;
        Ok(Self {
            id: row.id,
            course_id: row.course_id,
            user_id: row.user_id,
            completed_lesson_ids: row.completed_lesson_ids.into_iter().collect(),
            completion_percentage,
            started_at: row.started_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = certificates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CertificateRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub verification_code: String,
    pub issued_at: DateTime<Utc>,
}

impl From<&Certificate> for CertificateRow {
    fn from(certificate: &Certificate) -> Self {
        Self {
            id: certificate.id,
            course_id: certificate.course_id,
            user_id: certificate.user_id,
            verification_code: certificate.verification_code.clone(),
            issued_at: certificate.issued_at,
        }
    }
}

impl From<CertificateRow> for Certificate {
    fn from(row: CertificateRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            user_id: row.user_id,
            verification_code: row.verification_code,
            issued_at: row.issued_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Billing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = payment_tiers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PaymentTierRow {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub billing_interval: String,
    pub features: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&PaymentTier> for PaymentTierRow {
    fn from(tier: &PaymentTier) -> Self {
        Self {
            id: tier.id,
            community_id: tier.community_id,
            name: tier.name.clone(),
            description: tier.description.clone(),
            price_cents: u64_to_db(tier.price_cents),
            currency: tier.currency.clone(),
            billing_interval: tier.interval.as_str().to_owned(),
            features: tier.features.clone(),
            active: tier.active,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
            deleted_at: tier.deleted_at,
        }
    }
}

impl TryFrom<PaymentTierRow> for PaymentTier {
    type Error = RepositoryError;

    fn try_from(row: PaymentTierRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            community_id: row.community_id,
            name: row.name,
            description: row.description,
            price_cents: u64_from_db(row.price_cents, "payment_tiers.price_cents")?,
            currency: row.currency,
            interval: label_from_db(&row.billing_interval)?,
            features: row.features,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = checkout_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CheckoutSessionRow {
    pub id: Uuid,
    pub tier_id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub provider_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&CheckoutSession> for CheckoutSessionRow {
    fn from(session: &CheckoutSession) -> Self {
        Self {
            id: session.id,
            tier_id: session.tier_id,
            community_id: session.community_id,
            user_id: session.user_id,
            amount_cents: u64_to_db(session.amount_cents),
            currency: session.currency.clone(),
            status: session.status.as_str().to_owned(),
            provider_reference: session.provider_reference.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            completed_at: session.completed_at,
        }
    }
}

impl TryFrom<CheckoutSessionRow> for CheckoutSession {
    type Error = RepositoryError;

    fn try_from(row: CheckoutSessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            tier_id: row.tier_id,
            community_id: row.community_id,
            user_id: row.user_id,
            amount_cents: u64_from_db(row.amount_cents, "checkout_sessions.amount_cents")?,
            currency: row.currency,
            status: label_from_db(&row.status)?,
            provider_reference: row.provider_reference,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Notification> for NotificationRow {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            community_id: notification.community_id,
            kind: notification.kind.as_str().to_owned(),
            title: notification.title.clone(),
            body: notification.body.clone(),
            link: notification.link.clone(),
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            community_id: row.community_id,
            kind: label_from_db(&row.kind)?,
            title: row.title,
            body: row.body,
            link: row.link,
            read_at: row.read_at,
            created_at: row.created_at,
        })
    }
}
