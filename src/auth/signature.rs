//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `API-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::auth::{Credentials, RequestPayload};
use crate::error::KrakenError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a request for Kraken's private API.
///
/// The payload must carry a `nonce` field; its encoding is exactly the body
/// that has to be sent with the request.
///
/// # Example
///
/// ```rust
/// use kraken_cashout::auth::{Credentials, RequestPayload, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "YXBpX3NlY3JldA=="); // base64 of "api_secret"
/// let payload = RequestPayload::from_encoded("nonce=1234567890")?;
/// let signature = sign_request(&credentials, "/0/private/Balance", &payload)?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    url_path: &str,
    payload: &RequestPayload,
) -> Result<String, KrakenError> {
    let nonce = payload.nonce()?;
    sign_encoded(credentials, url_path, nonce, &payload.encode())
}

/// Sign an already encoded POST body for the given nonce.
fn sign_encoded(
    credentials: &Credentials,
    url_path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, KrakenError> {
    let secret_decoded = BASE64
        .decode(credentials.expose_secret())
        .map_err(|_| KrakenError::Signing("API secret must be valid base64.".to_string()))?;

    // SHA256(nonce + POST_data), kept as raw bytes.
    let mut sha256_hasher = Sha256::new();
    sha256_hasher.update(nonce.to_string().as_bytes());
    sha256_hasher.update(post_data.as_bytes());
    let sha256_hash = sha256_hasher.finalize();

    let mut hmac = HmacSha512::new_from_slice(&secret_decoded)
        .map_err(|e| KrakenError::Signing(format!("Invalid HMAC key: {e}")))?;
    hmac.update(url_path.as_bytes());
    hmac.update(&sha256_hash);
    let hmac_result = hmac.finalize().into_bytes();

    Ok(BASE64.encode(hmac_result))
}
