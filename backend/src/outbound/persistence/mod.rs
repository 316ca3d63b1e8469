//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of every repository port
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain entities. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Soft delete**: reads and updates only see rows whose `deleted_at` is
//!   null; deletes stamp the column.
//! - **Typed failures**: pool and Diesel errors map onto
//!   [`RepositoryError`](crate::domain::ports::RepositoryError), with unique
//!   violations reported as duplicates.
//!
//! # Example
//!
//! ```ignore
//! use commons::outbound::persistence::{DbPool, PoolConfig, diesel_repositories};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/commons")).await?;
//! let repositories = diesel_repositories(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_certificate_repository;
mod diesel_channel_repository;
mod diesel_checkout_repository;
mod diesel_comment_repository;
mod diesel_community_repository;
mod diesel_content_version_repository;
mod diesel_course_repository;
mod diesel_lesson_repository;
mod diesel_membership_repository;
mod diesel_notification_repository;
mod diesel_payment_tier_repository;
mod diesel_post_repository;
mod diesel_progress_repository;
mod diesel_search_index;
mod diesel_space_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

use crate::domain::ports::RepositorySet;

pub use diesel_certificate_repository::DieselCertificateRepository;
pub use diesel_channel_repository::DieselChannelRepository;
pub use diesel_checkout_repository::DieselCheckoutRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_community_repository::DieselCommunityRepository;
pub use diesel_content_version_repository::DieselContentVersionRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_lesson_repository::DieselLessonRepository;
pub use diesel_membership_repository::DieselMembershipRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_payment_tier_repository::DieselPaymentTierRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_progress_repository::DieselProgressRepository;
pub use diesel_search_index::DieselSearchIndex;
pub use diesel_space_repository::DieselSpaceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};

/// Repository set sharing one connection pool.
pub fn diesel_repositories(pool: DbPool) -> RepositorySet {
    RepositorySet {
        communities: Arc::new(DieselCommunityRepository::new(pool.clone())),
        memberships: Arc::new(DieselMembershipRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        spaces: Arc::new(DieselSpaceRepository::new(pool.clone())),
        channels: Arc::new(DieselChannelRepository::new(pool.clone())),
        posts: Arc::new(DieselPostRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        content_versions: Arc::new(DieselContentVersionRepository::new(pool.clone())),
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        lessons: Arc::new(DieselLessonRepository::new(pool.clone())),
        progress: Arc::new(DieselProgressRepository::new(pool.clone())),
        certificates: Arc::new(DieselCertificateRepository::new(pool.clone())),
        payment_tiers: Arc::new(DieselPaymentTierRepository::new(pool.clone())),
        checkouts: Arc::new(DieselCheckoutRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        search: Arc::new(DieselSearchIndex::new(pool)),
    }
}
