//! The reqwest-backed [`Gateway`] implementation.
//!
//! [`GatewayClient`] handles the gateway's tokenization and wallet-charge
//! endpoints and implements the [`payform::gateway::Gateway`] trait for use
//! by the flow state machines in `payform-flows`.
//!
//! ## Error Handling
//!
//! Failures are mapped into [`GatewayError`] categories before they leave
//! this crate:
//!
//! - URL construction failures
//! - transport failures (connect, timeout, DNS, TLS)
//! - JSON envelope decoding errors
//! - non-success statuses, carrying the gateway's own error message

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use payform::config::WidgetConfig;
use payform::error::GatewayError;
use payform::gateway::{
    CardDetails, ChargeResult, Gateway, GiftCardDetails, PaymentToken, WalletCapture, WalletKind,
};

use crate::types::{
    CaptureWalletChargeRequest, CardTokenRequest, GiftCardTokenRequest, ResourceEnvelope,
    WalletCallbackData,
};

/// Header carrying the merchant's public-key access token.
const USER_TOKEN_HEADER: &str = "x-user-token";

/// Path for card and gift-card tokenization.
const TOKENS_PATH: &str = "v1/payment_sources/tokens";

/// Path for wallet charge capture.
const WALLET_CAPTURE_PATH: &str = "v1/charges/wallet/capture";

/// Path prefix for per-charge wallet operations.
const WALLET_CHARGES_PATH: &str = "v1/charges/wallet";

/// A client for the payment gateway's widget-facing API.
///
/// Cheap to clone; the underlying `reqwest::Client` is an `Arc` internally.
///
/// # Example
///
/// ```no_run
/// use payform::config::{Environment, WidgetConfig};
/// use payform_http::GatewayClient;
///
/// let config = WidgetConfig::new("pk_test_123", "gw_456")
///     .with_environment(Environment::Sandbox);
/// let client = GatewayClient::try_new(config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient {
    config: WidgetConfig,
    base_url: Url,
    client: Client,
    timeout: Option<Duration>,
}

impl GatewayClient {
    /// Creates a client for the environment in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Url`] if the environment's base URL does not
    /// parse, which indicates a build-time defect rather than user input.
    pub fn try_new(config: WidgetConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(config.base_url())
            .map_err(|err| GatewayError::Url(err.to_string()))?;
        Ok(Self {
            config,
            base_url,
            client: Client::new(),
            timeout: None,
        })
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Used by tests and by hosts pointing at a gateway mock. A path without
    /// a trailing slash is normalized to end in one, since [`Url::join`]
    /// would otherwise drop the last path segment when building request
    /// URLs.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Url`] if `base_url` does not parse.
    pub fn with_base_url(config: WidgetConfig, base_url: &str) -> Result<Self, GatewayError> {
        let mut base_url =
            Url::parse(base_url).map_err(|err| GatewayError::Url(err.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            config,
            base_url,
            client: Client::new(),
            timeout: None,
        })
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn join(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::Url(err.to_string()))
    }

    fn auth_headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&self.config.access_token)
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        headers.insert(USER_TOKEN_HEADER, value);
        Ok(headers)
    }

    /// Sends a request and unwraps the gateway's resource envelope.
    ///
    /// A non-success status maps to [`GatewayError::Api`] with the
    /// envelope's message when one decodes; a success status with a missing
    /// resource or data is a [`GatewayError::Decode`].
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let mut request = request.headers(self.auth_headers()?);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ResourceEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map_or_else(|| "gateway request failed".to_owned(), |e| e.message_or_default());
            record_failure(status, &message);
            return Err(GatewayError::Api { status, message });
        }

        let envelope: ResourceEnvelope<T> = serde_json::from_str(&body)
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        envelope
            .resource
            .and_then(|resource| resource.data)
            .ok_or_else(|| {
                GatewayError::Decode("success response missing resource data".to_owned())
            })
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.join(path)?;
        self.execute(self.client.post(url).json(body)).await
    }
}

/// Emits a failure event when telemetry is enabled.
#[cfg(feature = "telemetry")]
fn record_failure(status: u16, message: &str) {
    tracing::event!(
        tracing::Level::WARN,
        status,
        error = %message,
        "gateway request rejected"
    );
}

#[cfg(not(feature = "telemetry"))]
fn record_failure(_status: u16, _message: &str) {}

#[async_trait]
impl Gateway for GatewayClient {
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(skip_all, fields(gateway_id = %self.config.gateway_id))
    )]
    async fn tokenize_card(&self, card: &CardDetails) -> Result<PaymentToken, GatewayError> {
        let address = card.address.as_ref();
        let body = CardTokenRequest {
            gateway_id: self.config.gateway_id.clone(),
            card_name: card.holder_name.clone(),
            card_number: card.number.digits().to_owned(),
            expire_month: card.expiry.month(),
            expire_year: card.expiry.year(),
            card_ccv: card.security_code.clone(),
            address_line1: address.map(|a| a.address_line1.clone()),
            address_line2: address.and_then(|a| a.address_line2.clone()),
            address_city: address.map(|a| a.city.clone()),
            address_state: address.map(|a| a.state.clone()),
            address_postcode: address.map(|a| a.postcode.clone()),
            address_country: address.map(|a| a.country.clone()),
            vault_save_card: card.save_card,
        };
        let url = format!(
            "{TOKENS_PATH}?public_key={}",
            self.config.access_token
        );
        let token: String = self.post(&url, &body).await?;
        Ok(PaymentToken::new(token))
    }

    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    async fn tokenize_gift_card(
        &self,
        card: &GiftCardDetails,
    ) -> Result<PaymentToken, GatewayError> {
        let body = GiftCardTokenRequest {
            kind: GiftCardTokenRequest::KIND,
            card_number: card.number.digits().to_owned(),
            card_pin: card.pin.clone(),
            store_pin: card.store_pin,
        };
        let url = format!(
            "{TOKENS_PATH}?public_key={}",
            self.config.access_token
        );
        let token: String = self.post(&url, &body).await?;
        Ok(PaymentToken::new(token))
    }

    #[cfg_attr(feature = "telemetry", tracing::instrument(skip_all))]
    async fn capture_wallet_charge(
        &self,
        capture: &WalletCapture,
    ) -> Result<ChargeResult, GatewayError> {
        let body = CaptureWalletChargeRequest {
            charge_token: capture.charge_token.clone(),
            amount: capture.amount,
        };
        self.post(WALLET_CAPTURE_PATH, &body).await
    }

    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(skip_all, fields(charge_id = %charge_id))
    )]
    async fn decline_wallet_charge(
        &self,
        charge_id: &str,
    ) -> Result<ChargeResult, GatewayError> {
        let path = format!("{WALLET_CHARGES_PATH}/{charge_id}/decline");
        let url = self.join(&path)?;
        self.execute(self.client.post(url)).await
    }

    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(skip_all, fields(charge_id = %charge_id, wallet = %kind))
    )]
    async fn wallet_callback(
        &self,
        charge_id: &str,
        kind: WalletKind,
    ) -> Result<Url, GatewayError> {
        let mut url = self.join(&format!("{WALLET_CHARGES_PATH}/callback"))?;
        url.query_pairs_mut()
            .append_pair("charge_id", charge_id)
            .append_pair("type", kind.callback_type());
        let data: WalletCallbackData = self.execute(self.client.get(url)).await?;
        Url::parse(&data.callback_url).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payform::card::{CardExpiry, CardNumber};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> WidgetConfig {
        WidgetConfig::new("pk_test_123", "gw_456")
    }

    fn test_card() -> CardDetails {
        CardDetails {
            holder_name: Some("John Citizen".into()),
            number: "4532015112830366".parse::<CardNumber>().unwrap(),
            expiry: "0639".parse::<CardExpiry>().unwrap(),
            security_code: "123".into(),
            address: None,
            save_card: false,
        }
    }

    async fn client_for(server: &MockServer) -> GatewayClient {
        GatewayClient::with_base_url(test_config(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_tokenize_card_request_shape_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_sources/tokens"))
            .and(query_param("public_key", "pk_test_123"))
            .and(header("x-user-token", "pk_test_123"))
            .and(body_partial_json(json!({
                "gateway_id": "gw_456",
                "card_name": "John Citizen",
                "card_number": "4532015112830366",
                "expire_month": 6,
                "expire_year": 2039,
                "card_ccv": "123",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": 201,
                "resource": { "type": "token", "data": "tok_abc" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server)
            .await
            .tokenize_card(&test_card())
            .await
            .unwrap();
        assert_eq!(token.as_str(), "tok_abc");
    }

    #[tokio::test]
    async fn test_tokenize_card_sends_billing_address_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_sources/tokens"))
            .and(body_partial_json(json!({
                "card_number": "4532015112830366",
                "address_line1": "1 Market St",
                "address_line2": "Unit 4",
                "address_city": "Sydney",
                "address_state": "NSW",
                "address_postcode": "2000",
                "address_country": "AU",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": 201,
                "resource": { "type": "token", "data": "tok_addr" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut card = test_card();
        card.address = Some(payform::address::BillingAddress {
            address_line1: "1 Market St".into(),
            address_line2: Some("Unit 4".into()),
            city: "Sydney".into(),
            state: "NSW".into(),
            postcode: "2000".into(),
            country: "AU".into(),
        });
        let token = client_for(&server).await.tokenize_card(&card).await.unwrap();
        assert_eq!(token.as_str(), "tok_addr");
    }

    #[tokio::test]
    async fn test_base_url_with_path_keeps_its_last_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gateway/v1/payment_sources/tokens"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": 201,
                "resource": { "type": "token", "data": "tok_path" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        // No trailing slash on the path segment.
        let base = format!("{}/gateway", server.uri());
        let client = GatewayClient::with_base_url(test_config(), &base).unwrap();
        let token = client.tokenize_card(&test_card()).await.unwrap();
        assert_eq!(token.as_str(), "tok_path");
    }

    #[tokio::test]
    async fn test_tokenize_card_maps_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_sources/tokens"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "status": 403,
                "error": { "message": "invalid public key" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .tokenize_card(&test_card())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Api {
                status: 403,
                message: "invalid public key".into()
            }
        );
    }

    #[tokio::test]
    async fn test_success_without_resource_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_sources/tokens"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "status": 201 })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .tokenize_card(&test_card())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_transport() {
        // Nothing is listening on this port.
        let client =
            GatewayClient::with_base_url(test_config(), "http://127.0.0.1:1/").unwrap();
        let err = client.tokenize_card(&test_card()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_tokenize_gift_card() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment_sources/tokens"))
            .and(body_partial_json(json!({
                "type": "gift_card",
                "card_number": "62734010001104878",
                "card_pin": "1234",
                "store_pin": true,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": 201,
                "resource": { "type": "token", "data": "tok_gift" }
            })))
            .mount(&server)
            .await;

        let details = GiftCardDetails {
            number: "62734010001104878".parse().unwrap(),
            pin: "1234".into(),
            store_pin: true,
        };
        let token = client_for(&server)
            .await
            .tokenize_gift_card(&details)
            .await
            .unwrap();
        assert_eq!(token.as_str(), "tok_gift");
    }

    #[tokio::test]
    async fn test_capture_wallet_charge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges/wallet/capture"))
            .and(body_partial_json(json!({ "charge_token": "ct_1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "resource": {
                    "type": "charge",
                    "data": { "id": "ch_1", "status": "complete", "amount": "10.50" }
                }
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .capture_wallet_charge(&WalletCapture {
                charge_token: "ct_1".into(),
                amount: None,
            })
            .await
            .unwrap();
        assert_eq!(result.charge_id, "ch_1");
        assert_eq!(result.status, "complete");
    }

    #[tokio::test]
    async fn test_decline_wallet_charge_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges/wallet/ch_9/decline"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "resource": {
                    "type": "charge",
                    "data": { "id": "ch_9", "status": "cancelled" }
                }
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .decline_wallet_charge("ch_9")
            .await
            .unwrap();
        assert_eq!(result.status, "cancelled");
    }

    #[tokio::test]
    async fn test_wallet_callback_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/charges/wallet/callback"))
            .and(query_param("charge_id", "ch_2"))
            .and(query_param("type", "flypay"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "resource": {
                    "type": "charge_callback",
                    "data": { "callback_url": "https://wallet.example/redirect/ch_2" }
                }
            })))
            .mount(&server)
            .await;

        let url = client_for(&server)
            .await
            .wallet_callback("ch_2", WalletKind::FlyPay)
            .await
            .unwrap();
        assert_eq!(url.as_str(), "https://wallet.example/redirect/ch_2");
    }
}
