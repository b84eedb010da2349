//! The gift card tokenization flow.

use payform::error::WidgetError;
use payform::gateway::{Gateway, GiftCardDetails, PaymentToken};
use payform::giftcard::{self, GiftCardNumber};
use payform::state::WidgetState;

/// Raw field values as the user has typed them.
#[derive(Debug, Clone, Default)]
pub struct GiftCardInput {
    /// Gift-card number digits, spaces stripped.
    pub number: String,
    /// PIN digits.
    pub pin: String,
    /// The store-PIN toggle.
    pub store_pin: bool,
}

/// State machine for the gift card widget.
///
/// Mirrors [`CardFlow`](crate::CardFlow): field updates, validity derived
/// from the current input, submit around [`Gateway::tokenize_gift_card`],
/// reset back to Idle.
#[derive(Debug)]
pub struct GiftCardFlow {
    input: GiftCardInput,
    state: WidgetState<PaymentToken>,
}

impl Default for GiftCardFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GiftCardFlow {
    /// Creates an idle flow with empty input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: GiftCardInput::default(),
            state: WidgetState::Idle,
        }
    }

    /// The current raw input.
    #[must_use]
    pub const fn input(&self) -> &GiftCardInput {
        &self.input
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &WidgetState<PaymentToken> {
        &self.state
    }

    /// Updates the gift-card number from raw or space-grouped input.
    pub fn set_number(&mut self, number: &str) {
        self.input.number = number.chars().filter(|c| *c != ' ').collect();
    }

    /// Updates the PIN.
    pub fn set_pin(&mut self, pin: &str) {
        self.input.pin = pin.to_owned();
    }

    /// Toggles whether the gateway stores the PIN against the token.
    pub const fn set_store_pin(&mut self, store: bool) {
        self.input.store_pin = store;
    }

    /// Whether both fields currently validate.
    #[must_use]
    pub fn is_data_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<GiftCardDetails, WidgetError> {
        let number: GiftCardNumber = self
            .input
            .number
            .parse()
            .map_err(|err: giftcard::GiftCardNumberError| {
                WidgetError::InvalidInput(err.to_string())
            })?;
        if !giftcard::is_valid_pin(&self.input.pin) {
            return Err(WidgetError::InvalidInput("gift card PIN is invalid".to_owned()));
        }
        Ok(GiftCardDetails {
            number,
            pin: self.input.pin.clone(),
            store_pin: self.input.store_pin,
        })
    }

    /// Submits the current input for tokenization.
    ///
    /// # Errors
    ///
    /// Same contract as [`CardFlow::submit`](crate::CardFlow::submit), with
    /// failures mapped to [`WidgetError::TokenizingGiftCard`].
    pub async fn submit(&mut self, gateway: &impl Gateway) -> Result<PaymentToken, WidgetError> {
        if !self.state.is_idle() {
            return Err(WidgetError::SubmissionInFlight);
        }
        let details = self.validate()?;
        self.state = WidgetState::Loading;
        match gateway.tokenize_gift_card(&details).await {
            Ok(token) => {
                self.state = WidgetState::Success(token.clone());
                Ok(token)
            }
            Err(err) => {
                let err = WidgetError::TokenizingGiftCard(err);
                self.state = WidgetState::Error(err.clone());
                Err(err)
            }
        }
    }

    /// Returns the flow to Idle and clears all input.
    pub fn reset(&mut self) {
        self.input = GiftCardInput::default();
        self.state = WidgetState::Idle;
    }
}
