//! Driven port for checkout sessions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::CheckoutSession;

use super::RepositoryError;

/// Storage for checkout sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutRepository: Send + Sync {
    async fn create(&self, session: &CheckoutSession) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CheckoutSession>, RepositoryError>;

    /// Persist status, provider reference, and completion time.
    async fn update(&self, session: &CheckoutSession) -> Result<(), RepositoryError>;
}
