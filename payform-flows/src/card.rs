//! The card tokenization flow.

use payform::card::{self, CardExpiry, CardNumber, CardScheme, SecurityCode, format};
use payform::config::FeatureFlags;
use payform::error::WidgetError;
use payform::gateway::{CardDetails, Gateway, PaymentToken};
use payform::state::WidgetState;

use crate::address::AddressFlow;

/// Raw field values as the user has typed them.
///
/// Kept as strings so partial input is representable; the typed forms
/// ([`CardNumber`], [`CardExpiry`]) only exist once a field validates.
#[derive(Debug, Clone, Default)]
pub struct CardInput {
    /// Cardholder name.
    pub holder_name: String,
    /// PAN digits, display formatting stripped.
    pub number: String,
    /// Expiry as typed, `MMYY`.
    pub expiry: String,
    /// Security code digits.
    pub security_code: String,
    /// The save-card toggle.
    pub save_card: bool,
}

/// State machine for the card widget.
///
/// Field updates are pure state transitions; [`CardFlow::is_data_valid`] is
/// recomputed from the current input on demand. [`CardFlow::submit`] drives
/// the Idle → Loading → Success/Error lifecycle around a single
/// [`Gateway::tokenize_card`] call, and [`CardFlow::reset`] returns to Idle.
///
/// # Example
///
/// ```no_run
/// # async fn demo(gateway: impl payform::gateway::Gateway) {
/// use payform::config::FeatureFlags;
/// use payform_flows::CardFlow;
///
/// let mut flow = CardFlow::new(FeatureFlags::default());
/// flow.set_card_number("4532 0151 1283 0366");
/// flow.set_expiry("0639");
/// flow.set_security_code("123");
/// assert!(flow.is_data_valid());
///
/// let token = flow.submit(&gateway).await.unwrap();
/// # }
/// ```
#[derive(Debug)]
pub struct CardFlow {
    flags: FeatureFlags,
    input: CardInput,
    address: Option<AddressFlow>,
    state: WidgetState<PaymentToken>,
}

impl CardFlow {
    /// Creates an idle flow with empty input.
    #[must_use]
    pub fn new(flags: FeatureFlags) -> Self {
        Self {
            flags,
            input: CardInput::default(),
            address: None,
            state: WidgetState::Idle,
        }
    }

    /// Attaches a billing-address sub-flow whose result is sent with the
    /// tokenization request.
    #[must_use]
    pub fn with_address(mut self, address: AddressFlow) -> Self {
        self.address = Some(address);
        self
    }

    /// The current raw input.
    #[must_use]
    pub const fn input(&self) -> &CardInput {
        &self.input
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &WidgetState<PaymentToken> {
        &self.state
    }

    /// The scheme detected from the digits typed so far.
    #[must_use]
    pub fn scheme(&self) -> CardScheme {
        CardScheme::detect(&self.input.number)
    }

    /// The PAN formatted in the detected scheme's display grouping.
    #[must_use]
    pub fn display_number(&self) -> String {
        format::group(&self.input.number, self.scheme())
    }

    /// Updates the cardholder name.
    pub fn set_holder_name(&mut self, name: &str) {
        self.input.holder_name = name.to_owned();
    }

    /// Updates the PAN from raw or display-formatted input.
    pub fn set_card_number(&mut self, number: &str) {
        self.input.number = format::strip(number);
    }

    /// Updates the expiry from `MMYY` input.
    pub fn set_expiry(&mut self, expiry: &str) {
        self.input.expiry = expiry.to_owned();
    }

    /// Updates the security code.
    pub fn set_security_code(&mut self, code: &str) {
        self.input.security_code = code.to_owned();
    }

    /// Toggles the save-card consent.
    pub const fn set_save_card(&mut self, save: bool) {
        self.input.save_card = save;
    }

    /// Whether every field currently validates.
    ///
    /// The cardholder name is only required when the widget is configured to
    /// collect it; an attached address sub-flow must also be complete.
    #[must_use]
    pub fn is_data_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<CardDetails, WidgetError> {
        let number: CardNumber = self
            .input
            .number
            .parse()
            .map_err(|err: card::CardNumberError| WidgetError::InvalidInput(err.to_string()))?;
        if !number.is_valid() {
            return Err(WidgetError::InvalidInput(
                "card number failed checksum".to_owned(),
            ));
        }
        let expiry: CardExpiry = self
            .input
            .expiry
            .parse()
            .map_err(|err: card::CardExpiryError| WidgetError::InvalidInput(err.to_string()))?;
        if !expiry.is_valid() {
            return Err(WidgetError::InvalidInput("card has expired".to_owned()));
        }
        if !SecurityCode::new(&self.input.security_code, number.scheme()).is_valid() {
            return Err(WidgetError::InvalidInput(
                "security code does not match card scheme".to_owned(),
            ));
        }
        let holder_name = if self.flags.collect_cardholder_name {
            if !card::holder::is_valid_holder_name(&self.input.holder_name) {
                return Err(WidgetError::InvalidInput(
                    "cardholder name is invalid".to_owned(),
                ));
            }
            Some(self.input.holder_name.trim().to_owned())
        } else {
            None
        };
        if self.flags.require_save_card_consent && !self.input.save_card {
            return Err(WidgetError::InvalidInput(
                "save-card consent is required".to_owned(),
            ));
        }
        let address = match &self.address {
            Some(flow) => Some(flow.complete()?),
            None => None,
        };
        Ok(CardDetails {
            holder_name,
            number,
            expiry,
            security_code: self.input.security_code.clone(),
            address,
            save_card: self.input.save_card,
        })
    }

    /// Submits the current input for tokenization.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::SubmissionInFlight`] if the flow is not Idle; the
    ///   state is left untouched and the host must [`reset`](Self::reset).
    /// - [`WidgetError::InvalidInput`] if any field fails validation; the
    ///   flow never enters Loading.
    /// - [`WidgetError::TokenizingCard`] when the gateway call fails; the
    ///   flow lands in [`WidgetState::Error`] with the same error.
    pub async fn submit(&mut self, gateway: &impl Gateway) -> Result<PaymentToken, WidgetError> {
        if !self.state.is_idle() {
            return Err(WidgetError::SubmissionInFlight);
        }
        let details = self.validate()?;
        self.state = WidgetState::Loading;
        match gateway.tokenize_card(&details).await {
            Ok(token) => {
                self.state = WidgetState::Success(token.clone());
                Ok(token)
            }
            Err(err) => {
                let err = WidgetError::TokenizingCard(err);
                self.state = WidgetState::Error(err.clone());
                Err(err)
            }
        }
    }

    /// Returns the flow to Idle and clears all input.
    pub fn reset(&mut self) {
        self.input = CardInput::default();
        if let Some(address) = &mut self.address {
            address.reset();
        }
        self.state = WidgetState::Idle;
    }
}
