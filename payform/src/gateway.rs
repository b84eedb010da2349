//! The gateway trait seam between widgets and the payment gateway.
//!
//! Flows in `payform-flows` talk to the gateway only through the [`Gateway`]
//! trait. The production implementation is `payform_http::GatewayClient`;
//! tests substitute in-memory fakes.

use std::fmt;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::address::BillingAddress;
use crate::card::{CardExpiry, CardNumber};
use crate::error::GatewayError;
use crate::giftcard::GiftCardNumber;

/// An opaque one-time token standing in for tokenized payment data.
///
/// This is the only form card data leaves the SDK in: the host passes it to
/// its backend, which exchanges it with the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentToken(String);

impl PaymentToken {
    /// Wraps a raw token string from the gateway.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card details ready for tokenization.
///
/// Constructed by `CardFlow` only after every field validates.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    /// Cardholder name, when the widget is configured to collect it.
    pub holder_name: Option<String>,
    /// The validated PAN.
    pub number: CardNumber,
    /// The validated expiry.
    pub expiry: CardExpiry,
    /// The security code, validated against the detected scheme.
    pub security_code: String,
    /// Billing address, when collected alongside the card.
    pub address: Option<BillingAddress>,
    /// Whether the user opted to save the card with the gateway.
    pub save_card: bool,
}

impl fmt::Debug for CardDetails {
    // The security code never appears in debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("holder_name", &self.holder_name)
            .field("number", &self.number)
            .field("expiry", &self.expiry)
            .field("save_card", &self.save_card)
            .finish_non_exhaustive()
    }
}

/// Gift card details ready for tokenization.
#[derive(Clone, PartialEq, Eq)]
pub struct GiftCardDetails {
    /// The validated gift-card number.
    pub number: GiftCardNumber,
    /// The validated PIN.
    pub pin: String,
    /// Whether the gateway should store the PIN against the token.
    pub store_pin: bool,
}

impl fmt::Debug for GiftCardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiftCardDetails")
            .field("number", &self.number)
            .field("store_pin", &self.store_pin)
            .finish_non_exhaustive()
    }
}

/// The wallet provider behind a wallet charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    /// Google Pay.
    GooglePay,
    /// PayPal.
    PayPal,
    /// FlyPay.
    FlyPay,
    /// Afterpay.
    Afterpay,
}

impl WalletKind {
    /// The `type` query value the gateway's callback endpoint expects.
    #[must_use]
    pub const fn callback_type(self) -> &'static str {
        match self {
            Self::GooglePay => "google_pay",
            Self::PayPal => "paypal",
            Self::FlyPay => "flypay",
            Self::Afterpay => "afterpay",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GooglePay => "Google Pay",
            Self::PayPal => "PayPal",
            Self::FlyPay => "FlyPay",
            Self::Afterpay => "Afterpay",
        };
        f.write_str(name)
    }
}

/// A request to capture a previously initialized wallet charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCapture {
    /// The one-time charge token handed over by the wallet's native SDK.
    pub charge_token: String,
    /// Optional amount override; `None` captures the initialized amount.
    pub amount: Option<Decimal>,
}

/// The gateway's view of a charge after capture or decline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeResult {
    /// Gateway-assigned charge identifier.
    #[serde(rename = "id")]
    pub charge_id: String,
    /// Charge status as reported by the gateway (e.g. `"complete"`).
    pub status: String,
    /// Captured amount, when the gateway reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// Async boundary to the payment gateway.
///
/// One method per gateway operation the widgets perform. Implementations
/// map their transport failures into [`GatewayError`] categories; the flows
/// then specialize those into per-operation
/// [`WidgetError`](crate::error::WidgetError) variants.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Exchanges card details for a one-time token.
    async fn tokenize_card(&self, card: &CardDetails) -> Result<PaymentToken, GatewayError>;

    /// Exchanges gift-card details for a one-time token.
    async fn tokenize_gift_card(
        &self,
        card: &GiftCardDetails,
    ) -> Result<PaymentToken, GatewayError>;

    /// Captures a wallet charge by its charge token.
    async fn capture_wallet_charge(
        &self,
        capture: &WalletCapture,
    ) -> Result<ChargeResult, GatewayError>;

    /// Declines an initialized wallet charge.
    async fn decline_wallet_charge(&self, charge_id: &str)
    -> Result<ChargeResult, GatewayError>;

    /// Fetches the redirect URL for a redirect-based wallet flow.
    async fn wallet_callback(
        &self,
        charge_id: &str,
        kind: WalletKind,
    ) -> Result<Url, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_details_debug_hides_security_code() {
        let details = CardDetails {
            holder_name: Some("John Citizen".into()),
            number: "4532015112830366".parse().unwrap(),
            expiry: "0639".parse().unwrap(),
            security_code: "123".into(),
            address: None,
            save_card: false,
        };
        let debug = format!("{details:?}");
        assert!(!debug.contains("123"));
        assert!(!debug.contains("4532015112830366"));
    }

    #[test]
    fn test_payment_token_serializes_transparently() {
        let token = PaymentToken::new("tok_abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"tok_abc\"");
    }

    #[test]
    fn test_wallet_callback_types() {
        assert_eq!(WalletKind::GooglePay.callback_type(), "google_pay");
        assert_eq!(WalletKind::FlyPay.callback_type(), "flypay");
    }
}
