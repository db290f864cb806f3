//! Process configuration from environment variables.
//!
//! | Variable                | Required | Default                  |
//! |-------------------------|----------|--------------------------|
//! | `KRAKEN_API_KEY`        | yes      |                          |
//! | `KRAKEN_API_SECRET`     | yes      | (base64)                 |
//! | `KRAKEN_API_URL`        | no       | `https://api.kraken.com` |
//! | `KRAKEN_API_OTP`        | no       |                          |
//! | `MIN_WITHDRAWAL`        | no       | `10`                     |
//! | `WITHDRAWAL_KEY`        | yes      |                          |
//!
//! The settlement delay is fixed at
//! [`DEFAULT_SETTLEMENT_DELAY`](crate::cashout::DEFAULT_SETTLEMENT_DELAY).

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use secrecy::{ExposeSecret, SecretString};

use crate::auth::Credentials;
use crate::cashout::CashoutConfig;
use crate::error::KrakenError;
use crate::rest::{KRAKEN_BASE_URL, KrakenRestClient};

pub const API_KEY_VAR: &str = "KRAKEN_API_KEY";
pub const API_SECRET_VAR: &str = "KRAKEN_API_SECRET";
pub const API_URL_VAR: &str = "KRAKEN_API_URL";
pub const API_OTP_VAR: &str = "KRAKEN_API_OTP";
pub const MIN_WITHDRAWAL_VAR: &str = "MIN_WITHDRAWAL";
pub const WITHDRAWAL_KEY_VAR: &str = "WITHDRAWAL_KEY";

const DEFAULT_MIN_WITHDRAWAL: &str = "10";

/// Everything a run needs, validated before any request is made.
pub struct Settings {
    pub credentials: Credentials,
    pub base_url: String,
    pub otp: Option<SecretString>,
    pub cashout: CashoutConfig,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, KrakenError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KrakenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| {
            non_empty(name).ok_or_else(|| KrakenError::Config(format!("{name} is not set")))
        };

        let api_key = required(API_KEY_VAR)?.trim().to_string();
        let api_secret = required(API_SECRET_VAR)?.trim().to_string();
        if BASE64.decode(&api_secret).is_err() {
            return Err(KrakenError::Config(format!("{API_SECRET_VAR} is not valid base64")));
        }
        let withdrawal_key = required(WITHDRAWAL_KEY_VAR)?;

        let base_url = non_empty(API_URL_VAR).unwrap_or_else(|| KRAKEN_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| KrakenError::Config(format!("{API_URL_VAR} is not a valid URL: {e}")))?;

        let min_withdrawal =
            non_empty(MIN_WITHDRAWAL_VAR).unwrap_or_else(|| DEFAULT_MIN_WITHDRAWAL.to_string());
        let cashout = CashoutConfig::new(withdrawal_key, min_withdrawal.trim())
            .map_err(|e| KrakenError::Config(format!("{MIN_WITHDRAWAL_VAR}: {e}")))?;
        if cashout.min_withdrawal.is_zero() {
            return Err(KrakenError::Config(format!("{MIN_WITHDRAWAL_VAR} must be positive")));
        }

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            base_url,
            otp: non_empty(API_OTP_VAR).map(SecretString::from),
            cashout,
        })
    }

    /// Build the REST client for these settings.
    pub fn client(&self) -> KrakenRestClient {
        let mut builder = KrakenRestClient::builder()
            .base_url(&self.base_url)
            .credentials(self.credentials.clone());
        if let Some(otp) = &self.otp {
            builder = builder.otp(otp.expose_secret());
        }
        builder.build()
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("has_otp", &self.otp.is_some())
            .field("cashout", &self.cashout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::cashout::DEFAULT_SETTLEMENT_DELAY;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, KrakenError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        (API_KEY_VAR, "key"),
        (API_SECRET_VAR, "c2VjcmV0"),
        (WITHDRAWAL_KEY_VAR, "my-bank"),
    ];

    #[test]
    fn test_defaults() {
        let settings = load(&REQUIRED).unwrap();
        assert_eq!(settings.base_url, KRAKEN_BASE_URL);
        assert!(settings.otp.is_none());
        assert_eq!(settings.cashout.withdrawal_key, "my-bank");
        assert_eq!(settings.cashout.min_withdrawal.to_string(), "10.0000");
        assert_eq!(settings.cashout.settlement_delay, DEFAULT_SETTLEMENT_DELAY);
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            (API_URL_VAR, "http://localhost:8080"),
            (API_OTP_VAR, "123456"),
            (MIN_WITHDRAWAL_VAR, "25.5"),
        ]);
        let settings = load(&vars).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.otp.as_ref().unwrap().expose_secret(), "123456");
        assert_eq!(settings.cashout.min_withdrawal.to_string(), "25.5000");
        assert_eq!(settings.cashout.settlement_delay, DEFAULT_SETTLEMENT_DELAY);
    }

    #[test]
    fn test_settlement_delay_is_not_read_from_env() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("SETTLEMENT_DELAY_SECS", "30"));
        let settings = load(&vars).unwrap();
        assert_eq!(settings.cashout.settlement_delay, DEFAULT_SETTLEMENT_DELAY);
    }

    #[test]
    fn test_credentials_are_trimmed() {
        let mut vars = REQUIRED.to_vec();
        vars[0] = (API_KEY_VAR, "  key \n");
        vars[1] = (API_SECRET_VAR, " c2VjcmV0 ");
        let settings = load(&vars).unwrap();
        assert_eq!(settings.credentials.api_key, "key");
        assert_eq!(settings.credentials.expose_secret(), "c2VjcmV0");
    }

    #[test]
    fn test_missing_required() {
        for (missing, _) in REQUIRED {
            let vars: Vec<_> = REQUIRED.into_iter().filter(|(k, _)| *k != missing).collect();
            let err = load(&vars).unwrap_err();
            assert!(
                matches!(&err, KrakenError::Config(msg) if msg.contains(missing)),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_secret() {
        let mut vars = REQUIRED.to_vec();
        vars[1] = (API_SECRET_VAR, "not base64!!");
        assert!(matches!(load(&vars), Err(KrakenError::Config(_))));
    }

    #[test]
    fn test_invalid_threshold() {
        for bad in ["ten", "0", "0.00"] {
            let mut vars = REQUIRED.to_vec();
            vars.push((MIN_WITHDRAWAL_VAR, bad));
            assert!(matches!(load(&vars), Err(KrakenError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let mut vars = REQUIRED.to_vec();
        vars.push((API_OTP_VAR, "987654"));
        let debug = format!("{:?}", load(&vars).unwrap());
        assert!(!debug.contains("c2VjcmV0"));
        assert!(!debug.contains("987654"));
    }
}
