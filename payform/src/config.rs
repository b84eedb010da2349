//! Widget configuration.

use serde::{Deserialize, Serialize};

/// Which gateway deployment a widget talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Live gateway; real money moves.
    #[default]
    Production,
    /// Integration sandbox with test card numbers.
    Sandbox,
    /// Pre-release staging deployment.
    Staging,
}

impl Environment {
    /// Base URL of the gateway API for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.payform.io",
            Self::Sandbox => "https://api-sandbox.payform.io",
            Self::Staging => "https://api-staging.payform.io",
        }
    }
}

/// Feature flags that alter what a widget collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeatureFlags {
    /// Show and require the cardholder-name field.
    pub collect_cardholder_name: bool,
    /// Offer a save-card toggle.
    pub allow_save_card: bool,
    /// Require the save-card consent to be ticked before submit.
    pub require_save_card_consent: bool,
}

/// Configuration handed to every widget at mount.
///
/// # Example
///
/// ```
/// use payform::config::{Environment, WidgetConfig};
///
/// let config = WidgetConfig::new("pk_test_123", "gw_456")
///     .with_environment(Environment::Sandbox);
/// assert_eq!(config.base_url(), "https://api-sandbox.payform.io");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Public-key access token identifying the merchant.
    pub access_token: String,
    /// The gateway service identifier tokens are created against.
    pub gateway_id: String,
    /// Which deployment to talk to.
    #[serde(default)]
    pub environment: Environment,
    /// Widget behavior toggles.
    #[serde(default)]
    pub flags: FeatureFlags,
}

impl WidgetConfig {
    /// Creates a production configuration with default flags.
    #[must_use]
    pub fn new(access_token: impl Into<String>, gateway_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            gateway_id: gateway_id.into(),
            environment: Environment::default(),
            flags: FeatureFlags::default(),
        }
    }

    /// Selects the gateway environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the widget feature flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Base URL of the gateway API for the configured environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}
