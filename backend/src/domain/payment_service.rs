//! Payment tiers, checkout sessions, and provider callbacks.
//!
//! A checkout session starts `pending` and accepts exactly one terminal
//! outcome from a signed webhook. A completed session grants its tier to the
//! buyer's membership, enrolling the buyer first when needed. The grant runs
//! before the session is settled, so a failed grant leaves the session open
//! for the provider's retry.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::access::can_manage;
use crate::domain::notification_service::deliver;
use crate::domain::ports::{
    CheckoutRepository, CommunityRepository, MembershipRepository, NotificationRepository,
    PaymentError, PaymentTierRepository, PaymentUseCases, WebhookVerifier,
};
use crate::domain::text::{optional_text, required_text};
use crate::domain::{
    CheckoutSession, CheckoutStatus, MemberRole, Membership, NewPaymentTier, Notification,
    NotificationKind, PaymentTier, PaymentTierChanges, PaymentWebhookEvent, is_currency_code,
    parse_identifier,
};

const MAX_NAME_CHARS: usize = 80;
const MAX_FEATURES: usize = 20;

/// Wire shape of a provider callback body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookBody {
    checkout_id: Uuid,
    status: String,
    #[serde(default)]
    provider_reference: Option<String>,
}

fn parse_webhook(payload: &[u8]) -> Result<PaymentWebhookEvent, PaymentError> {
    let body: WebhookBody = serde_json::from_slice(payload)
        .map_err(|error| PaymentError::invalid_input(format!("malformed webhook body: {error}")))?;
    let outcome = body
        .status
        .parse::<CheckoutStatus>()
        .map_err(|error| PaymentError::invalid_input(error.to_string()))?;
    if outcome.is_open() {
        return Err(PaymentError::invalid_input(
            "webhook status must be a terminal outcome",
        ));
    }
    Ok(PaymentWebhookEvent {
        checkout_id: body.checkout_id,
        outcome,
        provider_reference: optional_text(body.provider_reference),
    })
}

fn validated_name(raw: &str) -> Result<String, PaymentError> {
    required_text("name", raw, MAX_NAME_CHARS).map_err(PaymentError::invalid_input)
}

fn validated_features(raw: Vec<String>) -> Result<Vec<String>, PaymentError> {
    let features: Vec<String> = raw
        .into_iter()
        .filter_map(|feature| optional_text(Some(feature)))
        .collect();
    if features.len() > MAX_FEATURES {
        return Err(PaymentError::invalid_input(format!(
            "a tier lists at most {MAX_FEATURES} features"
        )));
    }
    Ok(features)
}

/// Repositories and adapters the payment service drives.
pub struct PaymentPorts<C: ?Sized, T: ?Sized, K: ?Sized, M: ?Sized, N: ?Sized, W: ?Sized> {
    pub communities: Arc<C>,
    pub tiers: Arc<T>,
    pub checkouts: Arc<K>,
    pub memberships: Arc<M>,
    pub notifications: Arc<N>,
    pub verifier: Arc<W>,
}

/// Payment service implementing [`PaymentUseCases`].
pub struct PaymentService<C: ?Sized, T: ?Sized, K: ?Sized, M: ?Sized, N: ?Sized, W: ?Sized> {
    ports: PaymentPorts<C, T, K, M, N, W>,
    clock: Arc<dyn Clock>,
}

impl<C: ?Sized, T: ?Sized, K: ?Sized, M: ?Sized, N: ?Sized, W: ?Sized>
    PaymentService<C, T, K, M, N, W>
{
    pub fn new(ports: PaymentPorts<C, T, K, M, N, W>, clock: Arc<dyn Clock>) -> Self {
        Self { ports, clock }
    }
}

impl<C, T, K, M, N, W> PaymentService<C, T, K, M, N, W>
where
    C: CommunityRepository + ?Sized,
    T: PaymentTierRepository + ?Sized,
    K: CheckoutRepository + ?Sized,
    M: MembershipRepository + ?Sized,
    N: NotificationRepository + ?Sized,
    W: WebhookVerifier + ?Sized,
{
    async fn existing_tier(&self, id: &Uuid) -> Result<PaymentTier, PaymentError> {
        self.ports
            .tiers
            .find_by_id(id)
            .await?
            .ok_or_else(PaymentError::tier_not_found)
    }

    async fn ensure_manager(
        &self,
        community_id: &Uuid,
        actor_id: &Uuid,
    ) -> Result<(), PaymentError> {
        if can_manage(self.ports.memberships.as_ref(), community_id, actor_id).await? {
            Ok(())
        } else {
            Err(PaymentError::not_permitted())
        }
    }

    async fn managed_tier(&self, actor_id: &Uuid, id: &Uuid) -> Result<PaymentTier, PaymentError> {
        let tier = self.existing_tier(id).await?;
        self.ensure_manager(&tier.community_id, actor_id).await?;
        Ok(tier)
    }

    /// Sets the session's tier on the buyer's membership. Repeating the grant
    /// for the same session leaves the membership unchanged.
    async fn grant_tier(&self, session: &CheckoutSession) -> Result<(), PaymentError> {
        let now = session.updated_at;
        let memberships = &self.ports.memberships;
        match memberships
            .find(&session.community_id, &session.user_id)
            .await?
        {
            Some(mut membership) => {
                membership.tier_id = Some(session.tier_id);
                membership.updated_at = now;
                memberships.update(&membership).await?;
            }
            None => {
                let mut membership = Membership::new(
                    session.community_id,
                    session.user_id,
                    MemberRole::Member,
                    now,
                );
                membership.tier_id = Some(session.tier_id);
                memberships.create(&membership).await?;
            }
        }
        Ok(())
    }

    async fn notify_buyer(&self, session: &CheckoutSession) {
        let now = session.updated_at;
        let notification = Notification::new(
            session.user_id,
            NotificationKind::PaymentSucceeded,
            "Payment received",
            "Your membership tier is now active",
            now,
        )
        .in_community(session.community_id)
        .linking_to(format!("/checkout/{}", session.id));
        deliver(self.ports.notifications.as_ref(), notification).await;
    }
}

#[async_trait]
impl<C, T, K, M, N, W> PaymentUseCases for PaymentService<C, T, K, M, N, W>
where
    C: CommunityRepository + ?Sized,
    T: PaymentTierRepository + ?Sized,
    K: CheckoutRepository + ?Sized,
    M: MembershipRepository + ?Sized,
    N: NotificationRepository + ?Sized,
    W: WebhookVerifier + ?Sized,
{
    async fn create_tier(
        &self,
        actor_id: &Uuid,
        input: NewPaymentTier,
    ) -> Result<PaymentTier, PaymentError> {
        let name = validated_name(&input.name)?;
        let currency = input.currency.trim().to_ascii_uppercase();
        if !is_currency_code(&currency) {
            return Err(PaymentError::invalid_input(
                "currency must be a three-letter ISO 4217 code",
            ));
        }
        let features = validated_features(input.features)?;
        if self
            .ports
            .communities
            .find_by_id(&input.community_id)
            .await?
            .is_none()
        {
            return Err(PaymentError::community_not_found());
        }
        self.ensure_manager(&input.community_id, actor_id).await?;

        let now = self.clock.utc();
        let tier = PaymentTier {
            id: Uuid::new_v4(),
            community_id: input.community_id,
            name,
            description: optional_text(input.description),
            price_cents: input.price_cents,
            currency,
            interval: input.interval,
            features,
            active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.ports.tiers.create(&tier).await?;
        Ok(tier)
    }

    async fn get_tier(&self, id: &str) -> Result<PaymentTier, PaymentError> {
        let id =
            parse_identifier(id).map_err(|error| PaymentError::invalid_input(error.to_string()))?;
        self.existing_tier(&id).await
    }

    async fn list_tiers(&self, community_id: &Uuid) -> Result<Vec<PaymentTier>, PaymentError> {
        if self
            .ports
            .communities
            .find_by_id(community_id)
            .await?
            .is_none()
        {
            return Err(PaymentError::community_not_found());
        }
        let tiers = self.ports.tiers.find_by_community_id(community_id).await?;
        Ok(tiers.into_iter().filter(|tier| tier.active).collect())
    }

    async fn update_tier(
        &self,
        actor_id: &Uuid,
        id: &Uuid,
        changes: PaymentTierChanges,
    ) -> Result<PaymentTier, PaymentError> {
        let mut tier = self.managed_tier(actor_id, id).await?;

        if let Some(name) = changes.name {
            tier.name = validated_name(&name)?;
        }
        if changes.description.is_some() {
            tier.description = optional_text(changes.description);
        }
        if let Some(price_cents) = changes.price_cents {
            tier.price_cents = price_cents;
        }
        if let Some(features) = changes.features {
            tier.features = validated_features(features)?;
        }
        if let Some(active) = changes.active {
            tier.active = active;
        }
        tier.updated_at = self.clock.utc();

        self.ports.tiers.update(&tier).await?;
        Ok(tier)
    }

    async fn delete_tier(&self, actor_id: &Uuid, id: &Uuid) -> Result<(), PaymentError> {
        self.managed_tier(actor_id, id).await?;
        if self.ports.tiers.delete(id, self.clock.utc()).await? {
            Ok(())
        } else {
            Err(PaymentError::tier_not_found())
        }
    }

    async fn start_checkout(
        &self,
        tier_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<CheckoutSession, PaymentError> {
        let tier = self.existing_tier(tier_id).await?;
        if !tier.active {
            return Err(PaymentError::tier_inactive());
        }
        let session = CheckoutSession::open(&tier, *user_id, self.clock.utc());
        self.ports.checkouts.create(&session).await?;
        tracing::info!(checkout_id = %session.id, tier_id = %tier.id, "checkout started");
        Ok(session)
    }

    async fn get_checkout(
        &self,
        id: &Uuid,
        user_id: &Uuid,
    ) -> Result<CheckoutSession, PaymentError> {
        self.ports
            .checkouts
            .find_by_id(id)
            .await?
            .filter(|session| session.user_id == *user_id)
            .ok_or_else(PaymentError::checkout_not_found)
    }

    async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        if !self.ports.verifier.verify(payload, signature) {
            tracing::warn!("rejected payment webhook with bad signature");
            return Err(PaymentError::invalid_signature());
        }
        let event = parse_webhook(payload)?;

        let mut session = self
            .ports
            .checkouts
            .find_by_id(&event.checkout_id)
            .await?
            .ok_or_else(PaymentError::checkout_not_found)?;
        if !session.status.is_open() {
            return Err(PaymentError::checkout_closed(session.status.as_str()));
        }

        let now = self.clock.utc();
        session.status = event.outcome;
        session.provider_reference = event.provider_reference;
        session.updated_at = now;
        let completed = event.outcome == CheckoutStatus::Completed;
        if completed {
            session.completed_at = Some(now);
            self.grant_tier(&session).await?;
        }
        self.ports.checkouts.update(&session).await?;
        tracing::info!(
            checkout_id = %session.id,
            status = %session.status,
            "checkout settled"
        );

        if completed {
            self.notify_buyer(&session).await;
        }
        Ok(session)
    }
}

#[cfg(test)]
#[path = "payment_service_tests.rs"]
mod tests;
