//! Kraken REST API client implementation.

use std::collections::HashMap;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::{Credentials, IncreasingNonce, NonceProvider, RequestPayload, sign_request};
use crate::error::{ApiError, KrakenError};
use crate::rest::endpoints::KRAKEN_BASE_URL;
use crate::rest::private::{
    AddOrderRequest, AddOrderResponse, ConfirmationRefId, WithdrawMethod, WithdrawMethodsRequest,
    WithdrawRequest,
};
use crate::rest::public::{ServerTime, SystemStatus};
use crate::rest::traits::KrakenClient;

/// The Kraken REST API client.
///
/// Owns the credentials and the nonce provider for one API key. Every call
/// is a single request/response exchange: failures are returned as they
/// happen and never retried.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_cashout::auth::Credentials;
/// use kraken_cashout::rest::KrakenRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = KrakenRestClient::builder()
///         .credentials(Credentials::new("api_key", "YXBpX3NlY3JldA=="))
///         .build();
///
///     let balances = client.get_account_balance().await?;
///     println!("Balance: {:?}", balances);
///
///     Ok(())
/// }
/// ```
pub struct KrakenRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Credentials>,
    otp: Option<SecretString>,
    nonce_provider: Box<dyn NonceProvider>,
}

impl KrakenRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    /// Use [`KrakenRestClient::builder()`] to configure credentials for private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KrakenRestClientBuilder {
        KrakenRestClientBuilder::new()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an unauthenticated GET request with optional query parameters.
    ///
    /// No nonce is consumed and no signature is computed.
    pub async fn public_request<T, Q>(
        &self,
        endpoint: &str,
        params: Option<&Q>,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let mut url = url::Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if let Some(params) = params {
            let query_string = serde_urlencoded::to_string(params)
                .map_err(|e| KrakenError::InvalidRequest(e.to_string()))?;
            if !query_string.is_empty() {
                url.set_query(Some(&query_string));
            }
        }

        debug!(endpoint, "public request");
        let response = self.http_client.get(url).send().await?;
        parse_response(response).await
    }

    /// Make an authenticated POST request using the client's configured OTP.
    pub async fn private_request<T, P>(&self, endpoint: &str, params: &P) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let otp = self.otp.as_ref().map(|otp| otp.expose_secret());
        self.private_request_with_otp(endpoint, params, otp).await
    }

    /// Make an authenticated POST request with an explicit one-time password.
    ///
    /// The payload is `nonce`, then the fields of `params`, then `otp`.
    pub async fn private_request_with_otp<T, P>(
        &self,
        endpoint: &str,
        params: &P,
        otp: Option<&str>,
    ) -> Result<T, KrakenError>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(KrakenError::MissingCredentials)?;

        let nonce = self.nonce_provider.next_nonce();
        let payload = RequestPayload::new(nonce, params, otp)?;
        let signature = sign_request(credentials, endpoint, &payload)?;

        debug!(endpoint, nonce, "private request");
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .http_client
            .post(&url)
            .header("API-Key", &credentials.api_key)
            .header("API-Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(payload.encode())
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Unwrap Kraken's `{error, result}` envelope.
///
/// A non-2xx status is a transport error regardless of the body. A non-empty
/// `error` array wins over any `result` the server also sent.
async fn parse_response<T>(response: reqwest::Response) -> Result<T, KrakenError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(KrakenError::Transport {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: KrakenResponse = serde_json::from_str(&body).map_err(|e| {
        KrakenError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
    })?;

    if let Some(api_error) = ApiError::from_error_array(&parsed.error) {
        return Err(KrakenError::Api(api_error));
    }

    let result = parsed.result.ok_or_else(|| {
        KrakenError::InvalidResponse("Response missing 'result' field".to_string())
    })?;
    Ok(serde_json::from_value(result)?)
}

impl Default for KrakenRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_otp", &self.otp.is_some())
            .finish()
    }
}

/// Builder for [`KrakenRestClient`].
pub struct KrakenRestClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    otp: Option<SecretString>,
    nonce_provider: Option<Box<dyn NonceProvider>>,
    user_agent: Option<String>,
}

impl KrakenRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            otp: None,
            nonce_provider: None,
            user_agent: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials for authenticated requests.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the two-factor password sent with every private request.
    pub fn otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(SecretString::from(otp.into()));
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: impl NonceProvider + 'static) -> Self {
        self.nonce_provider = Some(Box::new(provider));
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> KrakenRestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kraken-cashout/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kraken-cashout"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Box::new(IncreasingNonce::new()));

        KrakenRestClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            otp: self.otp,
            nonce_provider,
        }
    }
}

impl Default for KrakenRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope of every Kraken REST response.
#[derive(Debug, serde::Deserialize)]
struct KrakenResponse {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

impl KrakenClient for KrakenRestClient {
    async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        KrakenRestClient::get_server_time(self).await
    }

    async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        KrakenRestClient::get_system_status(self).await
    }

    async fn get_account_balance(&self) -> Result<HashMap<String, String>, KrakenError> {
        KrakenRestClient::get_account_balance(self).await
    }

    async fn add_order(&self, request: &AddOrderRequest) -> Result<AddOrderResponse, KrakenError> {
        KrakenRestClient::add_order(self, request).await
    }

    async fn withdraw_funds(
        &self,
        request: &WithdrawRequest,
    ) -> Result<ConfirmationRefId, KrakenError> {
        KrakenRestClient::withdraw_funds(self, request).await
    }

    async fn get_withdraw_methods(
        &self,
        request: Option<&WithdrawMethodsRequest>,
    ) -> Result<Vec<WithdrawMethod>, KrakenError> {
        KrakenRestClient::get_withdraw_methods(self, request).await
    }
}
