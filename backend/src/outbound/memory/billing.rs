//! Payment tiers and checkout sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{CheckoutRepository, PaymentTierRepository, RepositoryError};
use crate::domain::{CheckoutSession, PaymentTier};

use super::MemoryStore;

#[async_trait]
impl PaymentTierRepository for MemoryStore {
    async fn create(&self, tier: &PaymentTier) -> Result<(), RepositoryError> {
        self.payment_tiers.insert(tier, |_| false, "payment_tiers_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<PaymentTier>, RepositoryError> {
        self.payment_tiers.get(id)
    }

    async fn find_by_community_id(
        &self,
        community_id: &Uuid,
    ) -> Result<Vec<PaymentTier>, RepositoryError> {
        let mut tiers = self
            .payment_tiers
            .select(|tier| tier.community_id == *community_id)?;
        tiers.sort_by(|a, b| a.price_cents.cmp(&b.price_cents).then(a.name.cmp(&b.name)));
        Ok(tiers)
    }

    async fn update(&self, tier: &PaymentTier) -> Result<(), RepositoryError> {
        self.payment_tiers.replace(tier)
    }

    async fn delete(&self, id: &Uuid, deleted_at: DateTime<Utc>) -> Result<bool, RepositoryError> {
        self.payment_tiers.soft_delete(id, deleted_at)
    }
}

#[async_trait]
impl CheckoutRepository for MemoryStore {
    async fn create(&self, session: &CheckoutSession) -> Result<(), RepositoryError> {
        self.checkouts.insert(session, |_| false, "checkout_sessions_pkey")
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<CheckoutSession>, RepositoryError> {
        self.checkouts.get(id)
    }

    async fn update(&self, session: &CheckoutSession) -> Result<(), RepositoryError> {
        self.checkouts.replace(session)
    }
}
