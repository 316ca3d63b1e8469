//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the entities every tenant-scoped feature works with, the
//! ports adapters implement, and the services that enforce feature rules.
//! Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Entities per feature (`Community`, `Post`, `Course`, ...).
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failure payload.
//! - `*Service`: implementations of the driving ports in [`ports`].

pub mod error;
pub mod label;
pub mod ports;
pub mod trace_id;

mod access;
mod certificate;
mod channel;
mod comment;
mod community;
mod content_version;
mod course;
mod identifier;
mod lesson;
mod membership;
mod notification;
mod page;
mod payment;
mod post;
mod progress;
mod revisions;
mod search;
mod slug;
mod space;
mod text;
mod user;

mod auth_service;
mod certificate_service;
mod channel_service;
mod comment_service;
mod community_service;
mod course_service;
mod lesson_service;
mod membership_service;
mod notification_service;
mod payment_service;
mod post_service;
mod progress_service;
mod search_service;
mod space_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::certificate::{Certificate, verification_code};
pub use self::channel::{Channel, ChannelChanges, ChannelKind, NewChannel};
pub use self::comment::{Comment, CommentThread, NewComment, build_threads};
pub use self::community::{Community, CommunityChanges, NewCommunity, is_hex_color};
pub use self::content_version::{ContentKind, ContentVersion};
pub use self::course::{Course, CourseChanges, CourseStatus, NewCourse};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{IdentifierError, parse_identifier};
pub use self::label::UnknownLabel;
pub use self::lesson::{Lesson, LessonChanges, NewLesson};
pub use self::membership::{MemberRole, Membership};
pub use self::notification::{Notification, NotificationKind};
pub use self::page::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PageRequest};
pub use self::payment::{
    BillingInterval, CheckoutSession, CheckoutStatus, NewPaymentTier, PaymentTier,
    PaymentTierChanges, PaymentWebhookEvent, is_currency_code,
};
pub use self::post::{NewPost, Post, PostChanges};
pub use self::progress::{Progress, completion_percentage};
pub use self::search::{SearchHit, SearchKind, SearchQuery, SearchResults, rank_hits, snippet};
pub use self::slug::slugify;
pub use self::space::{NewSpace, Space, SpaceChanges, SpaceVisibility};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ProfileChanges, User, normalize_email};

pub use self::auth_service::AuthService;
pub use self::certificate_service::CertificateService;
pub use self::channel_service::ChannelService;
pub use self::comment_service::CommentService;
pub use self::community_service::CommunityService;
pub use self::course_service::CourseService;
pub use self::lesson_service::LessonService;
pub use self::membership_service::MembershipService;
pub use self::notification_service::NotificationService;
pub use self::payment_service::{PaymentPorts, PaymentService};
pub use self::post_service::PostService;
pub use self::progress_service::ProgressService;
pub use self::search_service::SearchService;
pub use self::space_service::SpaceService;
pub use self::user_service::UserService;
