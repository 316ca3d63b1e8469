//! Driven port for payment tiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::PaymentTier;

use super::RepositoryError;

/// Storage for payment tiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentTierRepository: Send + Sync {
    async fn create(&self, tier: &PaymentTier) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PaymentTier>, RepositoryError>;

    /// Live tiers of a community, cheapest first.
    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<PaymentTier>, RepositoryError>;

    async fn update(&self, tier: &PaymentTier) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError>;
}
