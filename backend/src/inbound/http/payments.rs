//! Payment tier, checkout, and provider webhook handlers.
//!
//! ```text
//! POST   /api/v1/communities/{id}/tiers {"name":"Pro","priceCents":900,"currency":"EUR","interval":"monthly"}
//! GET    /api/v1/communities/{id}/tiers
//! GET    /api/v1/tiers/{id}
//! PATCH  /api/v1/tiers/{id}
//! DELETE /api/v1/tiers/{id}
//! POST   /api/v1/tiers/{id}/checkout
//! GET    /api/v1/checkout/{id}
//! POST   /api/v1/webhooks/payments   (X-Commons-Signature: sha256=<hex>)
//! ```
//!
//! The webhook is called by the payment provider, not a browser, so it is
//! authenticated by an HMAC over the raw body instead of a session cookie.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    BillingInterval, CheckoutSession, Error, NewPaymentTier, PaymentTier, PaymentTierChanges,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, not_blank, parse_optional_label, parse_uuid, validated,
};

/// Header carrying the provider's body signature.
pub const SIGNATURE_HEADER: &str = "X-Commons-Signature";

const ID: FieldName = FieldName::new("id");

/// Public projection of a [`PaymentTier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTierResponse {
    pub id: Uuid,
    pub community_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: u64,
    pub currency: String,
    /// `monthly`, `yearly` or `one_time`.
    pub interval: String,
    pub features: Vec<String>,
    pub active: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<PaymentTier> for PaymentTierResponse {
    fn from(tier: PaymentTier) -> Self {
        Self {
            id: tier.id,
            community_id: tier.community_id,
            name: tier.name,
            description: tier.description,
            price_cents: tier.price_cents,
            currency: tier.currency,
            interval: tier.interval.as_str().to_owned(),
            features: tier.features,
            active: tier.active,
            created_at: tier.created_at,
            updated_at: tier.updated_at,
            deleted_at: tier.deleted_at,
        }
    }
}

/// Public projection of a [`CheckoutSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub id: Uuid,
    pub tier_id: Uuid,
    pub community_id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: u64,
    pub currency: String,
    /// `pending`, `completed`, `expired` or `cancelled`.
    pub status: String,
    pub provider_reference: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            id: session.id,
            tier_id: session.tier_id,
            community_id: session.community_id,
            user_id: session.user_id,
            amount_cents: session.amount_cents,
            currency: session.currency,
            status: session.status.as_str().to_owned(),
            provider_reference: session.provider_reference,
            created_at: session.created_at,
            updated_at: session.updated_at,
            completed_at: session.completed_at,
        }
    }
}

/// Body of `POST /api/v1/communities/{id}/tiers`.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTierSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    pub price_cents: u64,
    /// ISO 4217 code such as `EUR`.
    #[validate(length(equal = 3, message = "must be a three-letter currency code"))]
    pub currency: String,
    /// Defaults to `monthly`.
    pub interval: Option<String>,
    #[serde(default)]
    #[validate(length(max = 20, message = "must list at most 20 features"))]
    pub features: Vec<String>,
}

impl CreateTierSchema {
    fn into_new_tier(self, community_id: Uuid) -> Result<NewPaymentTier, Error> {
        let interval = parse_optional_label(self.interval.as_deref(), FieldName::new("interval"))?
            .unwrap_or(BillingInterval::Monthly);
        Ok(NewPaymentTier {
            community_id,
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            currency: self.currency,
            interval,
            features: self.features,
        })
    }
}

/// Body of `PATCH /api/v1/tiers/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierSchema {
    #[validate(
        length(min = 1, max = 80, message = "must be between 1 and 80 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
    pub price_cents: Option<u64>,
    #[validate(length(max = 20, message = "must list at most 20 features"))]
    pub features: Option<Vec<String>>,
    pub active: Option<bool>,
}

impl From<UpdateTierSchema> for PaymentTierChanges {
    fn from(schema: UpdateTierSchema) -> Self {
        Self {
            name: schema.name,
            description: schema.description,
            price_cents: schema.price_cents,
            features: schema.features,
            active: schema.active,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/communities/{id}/tiers",
    params(("id" = String, Path, description = "Community identifier")),
    request_body = CreateTierSchema,
    responses(
        (status = 201, description = "Tier created", body = PaymentTierResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "createTier"
)]
#[post("/communities/{id}/tiers")]
pub async fn create_tier(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateTierSchema>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let input = validated(payload.into_inner())?.into_new_tier(community_id)?;
    let tier = state.payments.create_tier(&actor_id, input).await?;
    Ok(HttpResponse::Created().json(PaymentTierResponse::from(tier)))
}

/// Active tiers of a community, cheapest first.
#[utoipa::path(
    get,
    path = "/api/v1/communities/{id}/tiers",
    params(("id" = String, Path, description = "Community identifier")),
    responses(
        (status = 200, description = "Tiers", body = [PaymentTierResponse]),
        (status = 404, description = "Community not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "listTiers"
)]
#[get("/communities/{id}/tiers")]
pub async fn list_tiers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PaymentTierResponse>>> {
    let community_id = parse_uuid(&path.into_inner(), ID)?;
    let tiers = state.payments.list_tiers(&community_id).await?;
    Ok(web::Json(tiers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tiers/{id}",
    params(("id" = String, Path, description = "Tier identifier")),
    responses(
        (status = 200, description = "Tier", body = PaymentTierResponse),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "getTier"
)]
#[get("/tiers/{id}")]
pub async fn get_tier(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PaymentTierResponse>> {
    let tier = state.payments.get_tier(&path.into_inner()).await?;
    Ok(web::Json(tier.into()))
}

#[utoipa::path(
    patch,
    path = "/api/v1/tiers/{id}",
    params(("id" = String, Path, description = "Tier identifier")),
    request_body = UpdateTierSchema,
    responses(
        (status = 200, description = "Updated tier", body = PaymentTierResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "updateTier"
)]
#[patch("/tiers/{id}")]
pub async fn update_tier(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateTierSchema>,
) -> ApiResult<web::Json<PaymentTierResponse>> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let schema = validated(payload.into_inner())?;
    let tier = state.payments.update_tier(&actor_id, &id, schema.into()).await?;
    Ok(web::Json(tier.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tiers/{id}",
    params(("id" = String, Path, description = "Tier identifier")),
    responses(
        (status = 204, description = "Tier deleted"),
        (status = 403, description = "Not a community owner or admin", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "deleteTier"
)]
#[delete("/tiers/{id}")]
pub async fn delete_tier(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    state.payments.delete_tier(&actor_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Open a pending checkout session for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/tiers/{id}/checkout",
    params(("id" = String, Path, description = "Tier identifier")),
    responses(
        (status = 201, description = "Checkout opened", body = CheckoutSessionResponse),
        (status = 404, description = "Tier not found", body = ErrorSchema),
        (status = 409, description = "Tier inactive", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "startCheckout"
)]
#[post("/tiers/{id}/checkout")]
pub async fn start_checkout(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let tier_id = parse_uuid(&path.into_inner(), ID)?;
    let checkout = state.payments.start_checkout(&tier_id, &user_id).await?;
    Ok(HttpResponse::Created().json(CheckoutSessionResponse::from(checkout)))
}

/// Fetch one of the signed-in user's checkout sessions.
#[utoipa::path(
    get,
    path = "/api/v1/checkout/{id}",
    params(("id" = String, Path, description = "Checkout session identifier")),
    responses(
        (status = 200, description = "Checkout session", body = CheckoutSessionResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "getCheckout"
)]
#[get("/checkout/{id}")]
pub async fn get_checkout(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CheckoutSessionResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let checkout = state.payments.get_checkout(&id, &user_id).await?;
    Ok(web::Json(checkout.into()))
}

/// Provider callback settling a checkout session.
///
/// The body is `{"checkoutId": "...", "status": "completed", "providerReference": "..."}`
/// signed with the shared secret; a missing or wrong signature is `401`.
#[utoipa::path(
    post,
    path = "/api/v1/webhooks/payments",
    request_body(content = String, content_type = "application/json"),
    params((
        "X-Commons-Signature" = String,
        Header,
        description = "HMAC-SHA256 of the raw body, formatted sha256=<hex>"
    )),
    responses(
        (status = 200, description = "Session settled", body = CheckoutSessionResponse),
        (status = 400, description = "Malformed event", body = ErrorSchema),
        (status = 401, description = "Bad signature", body = ErrorSchema),
        (status = 409, description = "Session already settled", body = ErrorSchema)
    ),
    tags = ["payments"],
    operation_id = "paymentWebhook",
    security([])
)]
#[post("/webhooks/payments")]
pub async fn payment_webhook(
    state: web::Data<HttpState>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<CheckoutSessionResponse>> {
    let signature = request
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let checkout = state.payments.handle_webhook(&body, signature).await?;
    Ok(web::Json(checkout.into()))
}
