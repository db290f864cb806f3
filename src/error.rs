//! Error types for the cashout client.

use thiserror::Error;

/// The main error type for all client and workflow operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// Missing or invalid configuration at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be signed
    #[error("Signing error: {0}")]
    Signing(String),

    /// The server answered with a non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Kraken API returned an error in the response envelope
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request parameters could not be encoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A decimal amount could not be parsed or compared
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,
}

/// Errors reported by Kraken in the `error` array of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Every entry of the envelope's `error` array, in order.
    pub errors: Vec<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl ApiError {
    /// Build an API error from a non-empty error array.
    ///
    /// Returns `None` when the array is empty.
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            errors: errors.to_vec(),
        })
    }

    /// Category of the first error (e.g. `EAPI` from `EAPI:Invalid nonce`).
    pub fn code(&self) -> &str {
        self.first().split_once(':').map_or("Unknown", |(code, _)| code)
    }

    /// Message of the first error, without its category.
    pub fn message(&self) -> &str {
        let first = self.first();
        first.split_once(':').map_or(first, |(_, message)| message)
    }

    fn first(&self) -> &str {
        self.errors.first().map(String::as_str).unwrap_or_default()
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.first() == error_codes::INVALID_NONCE
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.first() == error_codes::INVALID_KEY
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.first() == error_codes::INVALID_SIGNATURE
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.first() == error_codes::PERMISSION_DENIED
    }

    /// Check if the account lacked the funds for an order or withdrawal.
    pub fn is_insufficient_funds(&self) -> bool {
        self.first() == error_codes::INSUFFICIENT_FUNDS
            || self.first() == error_codes::FUNDING_INSUFFICIENT_FUNDS
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";

    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";

    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const ORDER_MINIMUM_NOT_MET: &str = "EOrder:Order minimum not met";

    pub const FUNDING_INSUFFICIENT_FUNDS: &str = "EFunding:Insufficient funds";
    pub const UNKNOWN_WITHDRAW_KEY: &str = "EFunding:Unknown withdraw key";
}
