//! Error taxonomy for payform widgets.
//!
//! Two layers: [`GatewayError`] categorizes transport-level failures
//! (produced by the HTTP client in `payform-http`), and [`WidgetError`]
//! specializes them per widget operation before they surface through a
//! flow's [`WidgetState`](crate::state::WidgetState). Every error carries a
//! message fit for display; nothing is silently swallowed.

/// A transport-level failure talking to the payment gateway.
///
/// Categories are deliberately coarse: the widget cannot act on the
/// difference between a DNS failure and a TLS failure, only on "the request
/// never completed" versus "the gateway said no".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// A request URL could not be constructed.
    #[error("invalid gateway URL: {0}")]
    Url(String),

    /// The request never completed (connect, timeout, DNS, TLS).
    #[error("request to gateway failed: {0}")]
    Transport(String),

    /// The response body could not be decoded as the expected shape.
    #[error("unexpected gateway response: {0}")]
    Decode(String),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// The gateway's error message, or a generic one if absent.
        message: String,
    },
}

/// The error a widget surfaces to its host through the completion callback.
///
/// One variant per gateway operation, plus the flow-level rejections
/// ([`InvalidInput`](Self::InvalidInput),
/// [`SubmissionInFlight`](Self::SubmissionInFlight)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Tokenizing card details failed.
    #[error("error tokenising card details")]
    TokenizingCard(#[source] GatewayError),

    /// Tokenizing gift card details failed.
    #[error("error tokenising gift card details")]
    TokenizingGiftCard(#[source] GatewayError),

    /// Capturing a wallet charge failed.
    #[error("error capturing wallet charge")]
    CapturingCharge(#[source] GatewayError),

    /// Declining a wallet charge failed.
    #[error("error declining wallet charge")]
    DecliningCharge(#[source] GatewayError),

    /// Fetching a wallet callback URL failed.
    #[error("error fetching wallet callback")]
    FetchingCallback(#[source] GatewayError),

    /// Submit was called while the input state was incomplete or invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Submit was called while a previous submission had not been reset.
    #[error("a submission is already in flight; reset the widget first")]
    SubmissionInFlight,

    /// A failure that fits no other category.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl WidgetError {
    /// Creates an [`Unknown`](Self::Unknown) error from any message.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown(message.into())
    }

    /// A single displayable message, folding in the gateway detail.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::TokenizingCard(source)
            | Self::TokenizingGiftCard(source)
            | Self::CapturingCharge(source)
            | Self::DecliningCharge(source)
            | Self::FetchingCallback(source) => format!("{self}: {source}"),
            Self::InvalidInput(_) | Self::SubmissionInFlight | Self::Unknown(_) => {
                self.to_string()
            }
        }
    }
}
