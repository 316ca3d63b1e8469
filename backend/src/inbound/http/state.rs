//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AuthUseCases, CertificateUseCases, ChannelUseCases, CommentUseCases, CommunityUseCases,
    CourseUseCases, LessonUseCases, MembershipUseCases, NotificationUseCases, PasswordHasher,
    PaymentUseCases, PostUseCases, ProgressUseCases, RepositorySet, SearchUseCases,
    SpaceUseCases, UserUseCases, WebhookVerifier,
};
use crate::domain::{
    AuthService, CertificateService, ChannelService, CommentService, CommunityService,
    CourseService, LessonService, MembershipService, NotificationService, PaymentPorts,
    PaymentService, PostService, ProgressService, SearchService, SpaceService, UserService,
};

/// Dependency bundle for HTTP handlers, one driving port per feature.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthUseCases>,
    pub users: Arc<dyn UserUseCases>,
    pub communities: Arc<dyn CommunityUseCases>,
    pub memberships: Arc<dyn MembershipUseCases>,
    pub spaces: Arc<dyn SpaceUseCases>,
    pub channels: Arc<dyn ChannelUseCases>,
    pub posts: Arc<dyn PostUseCases>,
    pub comments: Arc<dyn CommentUseCases>,
    pub courses: Arc<dyn CourseUseCases>,
    pub lessons: Arc<dyn LessonUseCases>,
    pub progress: Arc<dyn ProgressUseCases>,
    pub certificates: Arc<dyn CertificateUseCases>,
    pub payments: Arc<dyn PaymentUseCases>,
    pub notifications: Arc<dyn NotificationUseCases>,
    pub search: Arc<dyn SearchUseCases>,
}

impl HttpState {
    /// Wire every domain service over one repository set.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use commons::inbound::http::state::HttpState;
    /// use commons::outbound::memory::in_memory_repositories;
    /// use commons::outbound::security::{Argon2PasswordHasher, HmacWebhookVerifier};
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_repositories(
    ///     in_memory_repositories(),
    ///     Arc::new(Argon2PasswordHasher::new()),
    ///     Arc::new(HmacWebhookVerifier::new(b"secret".to_vec())),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _search = state.search.clone();
    /// ```
    pub fn from_repositories(
        repos: RepositorySet,
        hasher: Arc<dyn PasswordHasher>,
        verifier: Arc<dyn WebhookVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let RepositorySet {
            communities,
            memberships,
            users,
            spaces,
            channels,
            posts,
            comments,
            content_versions,
            courses,
            lessons,
            progress,
            certificates,
            payment_tiers,
            checkouts,
            notifications,
            search,
        } = repos;

        Self {
            auth: Arc::new(AuthService::new(users.clone(), hasher, clock.clone())),
            users: Arc::new(UserService::new(users, clock.clone())),
            communities: Arc::new(CommunityService::new(
                communities.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            memberships: Arc::new(MembershipService::new(
                communities.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            spaces: Arc::new(SpaceService::new(
                communities.clone(),
                spaces.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            channels: Arc::new(ChannelService::new(
                spaces,
                channels.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            posts: Arc::new(PostService::new(
                channels,
                posts.clone(),
                content_versions.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            comments: Arc::new(CommentService::new(
                posts,
                comments,
                notifications.clone(),
                clock.clone(),
            )),
            courses: Arc::new(CourseService::new(
                communities.clone(),
                courses.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            lessons: Arc::new(LessonService::new(
                courses.clone(),
                lessons.clone(),
                content_versions,
                memberships.clone(),
                clock.clone(),
            )),
            progress: Arc::new(ProgressService::new(
                courses,
                lessons,
                progress.clone(),
                notifications.clone(),
                memberships.clone(),
                clock.clone(),
            )),
            certificates: Arc::new(CertificateService::new(
                progress,
                certificates,
                clock.clone(),
            )),
            payments: Arc::new(PaymentService::new(
                PaymentPorts {
                    communities,
                    tiers: payment_tiers,
                    checkouts,
                    memberships,
                    notifications: notifications.clone(),
                    verifier,
                },
                clock.clone(),
            )),
            notifications: Arc::new(NotificationService::new(notifications, clock)),
            search: Arc::new(SearchService::new(search)),
        }
    }
}
