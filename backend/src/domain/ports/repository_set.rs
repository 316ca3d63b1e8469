//! Bundle of every driven adapter the services need.

use std::sync::Arc;

use super::{
    CertificateRepository, ChannelRepository, CheckoutRepository, CommentRepository,
    CommunityRepository, ContentVersionRepository, CourseRepository, LessonRepository,
    MembershipRepository, NotificationRepository, PaymentTierRepository, PostRepository,
    ProgressRepository, SearchIndex, SpaceRepository, UserRepository,
};

/// Persistence adapters selected at startup.
///
/// Both the PostgreSQL and the in-memory backends produce one of these, so
/// service wiring does not depend on the storage choice.
#[derive(Clone)]
pub struct RepositorySet {
    pub communities: Arc<dyn CommunityRepository>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub users: Arc<dyn UserRepository>,
    pub spaces: Arc<dyn SpaceRepository>,
    pub channels: Arc<dyn ChannelRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub content_versions: Arc<dyn ContentVersionRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub payment_tiers: Arc<dyn PaymentTierRepository>,
    pub checkouts: Arc<dyn CheckoutRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub search: Arc<dyn SearchIndex>,
}
