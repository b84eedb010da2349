#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Flow state machines for the payform payment-collection SDK.
//!
//! One flow per payment method. Each flow owns its input state and a
//! [`payform::state::WidgetState`], re-derives input validity on every field
//! update, and drives the Idle → Loading → Success/Error → Idle lifecycle
//! around a single [`payform::gateway::Gateway`] call.
//!
//! Flows are plain structs with no interior mutability: the UI layer that
//! owns a flow mutates it from its own sequential context, which is what
//! keeps the lifecycle linear without locks.
//!
//! # Modules
//!
//! - [`address`] - Billing address collection (no network call)
//! - [`card`] - Card tokenization
//! - [`giftcard`] - Gift card tokenization
//! - [`wallet`] - Wallet charge capture, decline, and callback fetch

pub mod address;
pub mod card;
pub mod giftcard;
pub mod wallet;

pub use address::AddressFlow;
pub use card::CardFlow;
pub use giftcard::GiftCardFlow;
pub use wallet::WalletFlow;

#[cfg(test)]
mod testutil {
    //! A programmable in-memory gateway for flow tests.

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    use payform::error::GatewayError;
    use payform::gateway::{
        CardDetails, ChargeResult, Gateway, GiftCardDetails, PaymentToken, WalletCapture,
        WalletKind,
    };

    /// Gateway stub returning canned results and counting calls.
    pub struct StubGateway {
        pub token: Result<PaymentToken, GatewayError>,
        pub charge: Result<ChargeResult, GatewayError>,
        pub callback: Result<Url, GatewayError>,
        pub calls: AtomicUsize,
    }

    impl StubGateway {
        pub fn returning_token(token: &str) -> Self {
            Self {
                token: Ok(PaymentToken::new(token)),
                ..Self::default()
            }
        }

        pub fn failing(err: GatewayError) -> Self {
            Self {
                token: Err(err.clone()),
                charge: Err(err.clone()),
                callback: Err(err),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Default for StubGateway {
        fn default() -> Self {
            Self {
                token: Ok(PaymentToken::new("tok_default")),
                charge: Ok(ChargeResult {
                    charge_id: "ch_default".into(),
                    status: "complete".into(),
                    amount: None,
                }),
                callback: Ok(Url::parse("https://wallet.example/redirect").unwrap()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Gateway for StubGateway {
        async fn tokenize_card(
            &self,
            _card: &CardDetails,
        ) -> Result<PaymentToken, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.token.clone()
        }

        async fn tokenize_gift_card(
            &self,
            _card: &GiftCardDetails,
        ) -> Result<PaymentToken, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.token.clone()
        }

        async fn capture_wallet_charge(
            &self,
            _capture: &WalletCapture,
        ) -> Result<ChargeResult, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.charge.clone()
        }

        async fn decline_wallet_charge(
            &self,
            _charge_id: &str,
        ) -> Result<ChargeResult, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.charge.clone()
        }

        async fn wallet_callback(
            &self,
            _charge_id: &str,
            _kind: WalletKind,
        ) -> Result<Url, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.callback.clone()
        }
    }
}
