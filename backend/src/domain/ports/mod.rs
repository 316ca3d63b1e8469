//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`SearchIndex`], [`PasswordHasher`],
//! [`WebhookVerifier`]) are implemented by outbound adapters. Driving ports
//! (`*UseCases`) are implemented by domain services and called by inbound
//! adapters; each carries a closed error enum.

mod macros;
pub(crate) use macros::{define_port_error, define_use_case_error};

mod auth_use_cases;
mod certificate_repository;
mod certificate_use_cases;
mod channel_repository;
mod channel_use_cases;
mod checkout_repository;
mod comment_repository;
mod comment_use_cases;
mod community_repository;
mod community_use_cases;
mod content_version_repository;
mod course_repository;
mod course_use_cases;
mod lesson_repository;
mod lesson_use_cases;
mod membership_repository;
mod membership_use_cases;
mod notification_repository;
mod notification_use_cases;
mod password_hasher;
mod payment_tier_repository;
mod payment_use_cases;
mod post_repository;
mod post_use_cases;
mod progress_repository;
mod progress_use_cases;
mod repository_error;
mod repository_set;
mod search_index;
mod search_use_cases;
mod space_repository;
mod space_use_cases;
mod user_repository;
mod user_use_cases;
mod webhook_verifier;

pub use auth_use_cases::{AuthError, AuthUseCases, SignIn, SignUp};
pub use certificate_repository::CertificateRepository;
pub use certificate_use_cases::{CertificateError, CertificateUseCases};
pub use channel_repository::ChannelRepository;
pub use channel_use_cases::{ChannelError, ChannelUseCases};
pub use checkout_repository::CheckoutRepository;
pub use comment_repository::CommentRepository;
pub use comment_use_cases::{CommentError, CommentUseCases};
pub use community_repository::CommunityRepository;
pub use community_use_cases::{CommunityError, CommunityUseCases};
pub use content_version_repository::ContentVersionRepository;
pub use course_repository::CourseRepository;
pub use course_use_cases::{CourseError, CourseUseCases};
pub use lesson_repository::LessonRepository;
pub use lesson_use_cases::{LessonError, LessonUseCases};
pub use membership_repository::MembershipRepository;
pub use membership_use_cases::{MembershipError, MembershipUseCases};
pub use notification_repository::NotificationRepository;
pub use notification_use_cases::{NotificationError, NotificationUseCases};
pub use password_hasher::{CredentialError, PasswordHasher};
pub use payment_tier_repository::PaymentTierRepository;
pub use payment_use_cases::{PaymentError, PaymentUseCases};
pub use post_repository::PostRepository;
pub use post_use_cases::{PostError, PostUseCases};
pub use progress_repository::ProgressRepository;
pub use progress_use_cases::{ProgressError, ProgressUseCases};
pub use repository_error::RepositoryError;
pub use repository_set::RepositorySet;
pub use search_index::SearchIndex;
pub use search_use_cases::{SearchError, SearchUseCases};
pub use space_repository::SpaceRepository;
pub use space_use_cases::{SpaceError, SpaceUseCases};
pub use user_repository::UserRepository;
pub use user_use_cases::{UserError, UserUseCases};
pub use webhook_verifier::WebhookVerifier;

#[cfg(test)]
pub use self::{
    certificate_repository::MockCertificateRepository,
    channel_repository::MockChannelRepository, checkout_repository::MockCheckoutRepository,
    comment_repository::MockCommentRepository, community_repository::MockCommunityRepository,
    content_version_repository::MockContentVersionRepository,
    course_repository::MockCourseRepository, lesson_repository::MockLessonRepository,
    membership_repository::MockMembershipRepository,
    notification_repository::MockNotificationRepository,
    password_hasher::MockPasswordHasher, payment_tier_repository::MockPaymentTierRepository,
    post_repository::MockPostRepository, progress_repository::MockProgressRepository,
    search_index::MockSearchIndex, space_repository::MockSpaceRepository,
    user_repository::MockUserRepository, webhook_verifier::MockWebhookVerifier,
};
