//! Driving port for payment tiers, checkout, and provider callbacks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CheckoutSession, NewPaymentTier, PaymentTier, PaymentTierChanges};

use super::define_use_case_error;

define_use_case_error! {
    /// Failures of payment use cases.
    pub enum PaymentError {
        InvalidInput { message: String } => "invalid payment input: {message}" as InvalidRequest,
        CommunityNotFound => "community not found" as NotFound,
        TierNotFound => "payment tier not found" as NotFound,
        CheckoutNotFound => "checkout session not found" as NotFound,
        TierInactive => "payment tier is not available for purchase" as Conflict,
        CheckoutClosed { status: String } => "checkout session is already {status}" as Conflict,
        InvalidSignature => "webhook signature is invalid" as Unauthorized,
        NotPermitted => "only community owners and admins may manage tiers" as Forbidden,
    }
}

/// Payment use cases.
#[async_trait]
pub trait PaymentUseCases: Send + Sync {
    /// Add a tier; the actor must manage the community.
    async fn create_tier(
        &self,
        actor_id: &Uuid,
        input: NewPaymentTier,
    ) -> Result<PaymentTier, PaymentError>;

    async fn get_tier(&self, id: &str) -> Result<PaymentTier, PaymentError>;

    /// Active tiers of a community, cheapest first.
    async fn list_tiers(&self, community_id: &Uuid) -> Result<Vec<PaymentTier>, PaymentError>;

    async fn update_tier(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: PaymentTierChanges,
    ) -> Result<PaymentTier, PaymentError>;

    async fn delete_tier(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), PaymentError>;

    /// Open a pending checkout session for an active tier.
    async fn start_checkout(
        &self,
        tier_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Fetch a checkout session owned by `user_id`.
    async fn get_checkout(
        &self,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Apply a signed provider callback to its checkout session.
    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<CheckoutSession, PaymentError>;
}
