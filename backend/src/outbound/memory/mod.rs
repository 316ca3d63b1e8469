//! In-memory adapters for every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Rows live in process memory and vanish on restart. The uniqueness
//! rules of the PostgreSQL schema are mirrored here, so services observe the
//! same [`RepositoryError::Duplicate`](crate::domain::ports::RepositoryError)
//! failures on either backend.

mod billing;
mod community;
mod forum;
mod learning;
mod notifications;
mod search;
mod table;

use std::sync::Arc;

use crate::domain::ports::RepositorySet;
use crate::domain::{
    Certificate, Channel, CheckoutSession, Comment, Community, ContentVersion, Course, Lesson,
    Membership, Notification, PaymentTier, Post, Progress, Space, User,
};

use self::table::{Table, permanent_rows, soft_deletable_rows};

/// A user together with the password hash only the store sees.
#[derive(Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

impl table::Row for UserRecord {
    fn id(&self) -> uuid::Uuid {
        self.user.id
    }

    fn is_live(&self) -> bool {
        self.user.deleted_at.is_none()
    }

    fn mark_deleted(&mut self, at: chrono::DateTime<chrono::Utc>) {
        self.user.deleted_at = Some(at);
    }
}

soft_deletable_rows!(
    Community,
    Membership,
    Space,
    Channel,
    Post,
    Comment,
    Course,
    Lesson,
    PaymentTier,
);
permanent_rows!(
    ContentVersion,
    Progress,
    Certificate,
    CheckoutSession,
    Notification,
);

/// Process-local store implementing every repository port.
#[derive(Default)]
pub struct MemoryStore {
    communities: Table<Community>,
    memberships: Table<Membership>,
    users: Table<UserRecord>,
    spaces: Table<Space>,
    channels: Table<Channel>,
    posts: Table<Post>,
    comments: Table<Comment>,
    content_versions: Table<ContentVersion>,
    courses: Table<Course>,
    lessons: Table<Lesson>,
    progress: Table<Progress>,
    certificates: Table<Certificate>,
    payment_tiers: Table<PaymentTier>,
    checkouts: Table<CheckoutSession>,
    notifications: Table<Notification>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Repository set backed by one fresh [`MemoryStore`].
pub fn in_memory_repositories() -> RepositorySet {
    let store = Arc::new(MemoryStore::new());
    RepositorySet {
        communities: store.clone(),
        memberships: store.clone(),
        users: store.clone(),
        spaces: store.clone(),
        channels: store.clone(),
        posts: store.clone(),
        comments: store.clone(),
        content_versions: store.clone(),
        courses: store.clone(),
        lessons: store.clone(),
        progress: store.clone(),
        certificates: store.clone(),
        payment_tiers: store.clone(),
        checkouts: store.clone(),
        notifications: store.clone(),
        search: store,
    }
}
