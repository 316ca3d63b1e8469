//! Payment tiers and checkout sessions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::label::define_label_enum;

define_label_enum! {
    /// How often a tier is billed.
    pub enum BillingInterval {
        Monthly => "monthly",
        Yearly => "yearly",
        OneTime => "one_time",
    }
}

define_label_enum! {
    /// Lifecycle of a checkout session.
    pub enum CheckoutStatus {
        Pending => "pending",
        Completed => "completed",
        Expired => "expired",
        Cancelled => "cancelled",
    }
}

impl CheckoutStatus {
    /// Whether the session still awaits a provider outcome.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A purchasable membership level of a community.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTier {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: u64,
    /// ISO 4217 code in upper case.
    pub currency: String,
    pub interval: BillingInterval,
    pub features: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for creating a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentTier {
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: u64,
    pub currency: String,
    pub interval: BillingInterval,
    pub features: Vec<String>,
}

/// Partial update of a tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentTierChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    pub features: Option<Vec<String>>,
    pub active: Option<bool>,
}

/// A purchase attempt awaiting the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: Uuid,
    pub tier_id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: u64,
    pub currency: String,
    pub status: CheckoutStatus,
    pub provider_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl CheckoutSession {
    /// Open a pending session priced from `tier`.
    pub fn open(tier: &PaymentTier, user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tier_id: tier.id,
            community_id: tier.community_id,
            user_id,
            amount_cents: tier.price_cents,
            currency: tier.currency.clone(),
            status: CheckoutStatus::Pending,
            provider_reference: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}

/// Outcome reported by the payment provider for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWebhookEvent {
    pub checkout_id: Uuid,
    pub outcome: CheckoutStatus,
    pub provider_reference: Option<String>,
}

/// Return `true` for three upper-case ASCII letters.
///
/// # Examples
/// ```
/// use commons::domain::is_currency_code;
///
/// assert!(is_currency_code("EUR"));
/// assert!(!is_currency_code("eur"));
/// ```
pub fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|ch| ch.is_ascii_uppercase())
}
