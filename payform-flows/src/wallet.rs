//! The wallet charge flow.
//!
//! Wallet payments (Google Pay, PayPal, FlyPay, Afterpay) are initialized by
//! the host's backend, which hands the widget a one-time charge token. The
//! flow's primary submission is the capture call; declining a charge and
//! fetching the redirect callback URL are auxiliary operations that do not
//! participate in the capture lifecycle.

use rust_decimal::Decimal;
use url::Url;

use payform::error::WidgetError;
use payform::gateway::{ChargeResult, Gateway, WalletCapture, WalletKind};
use payform::state::WidgetState;

/// State machine for a wallet widget.
///
/// One instance per wallet provider; the [`WalletKind`] only affects the
/// callback-type parameter and the error messages, so all four providers
/// share this flow.
#[derive(Debug)]
pub struct WalletFlow {
    kind: WalletKind,
    state: WidgetState<ChargeResult>,
}

impl WalletFlow {
    /// Creates an idle flow for the given wallet provider.
    #[must_use]
    pub const fn new(kind: WalletKind) -> Self {
        Self {
            kind,
            state: WidgetState::Idle,
        }
    }

    /// The wallet provider this flow fronts.
    #[must_use]
    pub const fn kind(&self) -> WalletKind {
        self.kind
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &WidgetState<ChargeResult> {
        &self.state
    }

    /// Captures an initialized wallet charge.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::SubmissionInFlight`] if the flow is not Idle.
    /// - [`WidgetError::InvalidInput`] if the charge token is blank.
    /// - [`WidgetError::CapturingCharge`] when the gateway call fails; the
    ///   flow lands in [`WidgetState::Error`] with the same error.
    pub async fn capture(
        &mut self,
        gateway: &impl Gateway,
        charge_token: &str,
        amount: Option<Decimal>,
    ) -> Result<ChargeResult, WidgetError> {
        if !self.state.is_idle() {
            return Err(WidgetError::SubmissionInFlight);
        }
        if charge_token.trim().is_empty() {
            return Err(WidgetError::InvalidInput("charge token is blank".to_owned()));
        }
        self.state = WidgetState::Loading;
        let capture = WalletCapture {
            charge_token: charge_token.to_owned(),
            amount,
        };
        match gateway.capture_wallet_charge(&capture).await {
            Ok(result) => {
                self.state = WidgetState::Success(result.clone());
                Ok(result)
            }
            Err(err) => {
                let err = WidgetError::CapturingCharge(err);
                self.state = WidgetState::Error(err.clone());
                Err(err)
            }
        }
    }

    /// Declines an initialized charge, e.g. when the user dismisses the
    /// wallet sheet. Does not alter the capture lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::DecliningCharge`] when the gateway call fails.
    pub async fn decline(
        &self,
        gateway: &impl Gateway,
        charge_id: &str,
    ) -> Result<ChargeResult, WidgetError> {
        gateway
            .decline_wallet_charge(charge_id)
            .await
            .map_err(WidgetError::DecliningCharge)
    }

    /// Fetches the redirect URL for a redirect-based wallet flow.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::FetchingCallback`] when the gateway call
    /// fails.
    pub async fn callback_url(
        &self,
        gateway: &impl Gateway,
        charge_id: &str,
    ) -> Result<Url, WidgetError> {
        gateway
            .wallet_callback(charge_id, self.kind)
            .await
            .map_err(WidgetError::FetchingCallback)
    }

    /// Returns the flow to Idle.
    pub fn reset(&mut self) {
        self.state = WidgetState::Idle;
    }
}
