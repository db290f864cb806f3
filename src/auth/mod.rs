//! Authentication module for Kraken API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - The shared form encoding used for both request bodies and signatures
//! - HMAC-SHA512 signature generation for authenticated requests

mod credentials;
mod nonce;
mod payload;
mod signature;

pub use credentials::Credentials;
pub use nonce::{IncreasingNonce, NonceProvider};
pub use payload::{NONCE_FIELD, OTP_FIELD, RequestPayload};
pub use signature::sign_request;
