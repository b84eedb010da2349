//! Wire DTOs for the gateway API.
//!
//! Field names are fixed by the gateway's JSON contract (`card_number`,
//! `card_ccv`, `gateway_id`, ...); do not rename them to taste. Every
//! response arrives wrapped in the [`ResourceEnvelope`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/payment_sources/tokens` with card details.
#[derive(Debug, Clone, Serialize)]
pub struct CardTokenRequest {
    /// The gateway service the token is created against.
    pub gateway_id: String,
    /// Cardholder name, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    /// The PAN, bare digits.
    pub card_number: String,
    /// Expiry month, `1..=12`.
    pub expire_month: u32,
    /// Expiry year, four digits.
    pub expire_year: i32,
    /// The security code.
    pub card_ccv: String,
    /// Billing address line 1, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    /// Billing address line 2, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// Billing city, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    /// Billing state, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,
    /// Billing postcode, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_postcode: Option<String>,
    /// Billing country, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    /// Whether to vault the card for reuse.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub vault_save_card: bool,
}

/// Request body for `POST /v1/payment_sources/tokens` with gift-card details.
#[derive(Debug, Clone, Serialize)]
pub struct GiftCardTokenRequest {
    /// Always `"gift_card"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The gift-card number, bare digits.
    pub card_number: String,
    /// The gift-card PIN.
    pub card_pin: String,
    /// Whether the gateway should store the PIN against the token.
    pub store_pin: bool,
}

impl GiftCardTokenRequest {
    /// The fixed `type` discriminator for gift-card token requests.
    pub const KIND: &'static str = "gift_card";
}

/// Request body for `POST /v1/charges/wallet/capture`.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureWalletChargeRequest {
    /// The one-time charge token from the wallet's native SDK.
    pub charge_token: String,
    /// Optional amount override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// `resource.data` of `GET /v1/charges/wallet/callback`.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletCallbackData {
    /// The redirect URL the host should open.
    pub callback_url: String,
}

/// The gateway's standard response envelope.
///
/// Success responses carry a [`Resource`]; error responses carry an
/// [`ApiErrorBody`]. Both can technically appear, in which case the HTTP
/// status decides which one matters.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceEnvelope<T> {
    /// Echo of the HTTP status.
    #[serde(default)]
    pub status: Option<u16>,
    /// The payload, on success.
    #[serde(default = "Option::default")]
    pub resource: Option<Resource<T>>,
    /// The error detail, on failure.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A typed resource inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<T> {
    /// Resource discriminator (e.g. `"token"`, `"charge"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The resource payload.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message from the gateway.
    #[serde(default)]
    pub message: Option<String>,
    /// Free-form detail blob; logged, never parsed.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// The gateway's message, or a generic fallback.
    #[must_use]
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "gateway request failed".to_owned())
    }
}
