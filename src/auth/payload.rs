//! Form-encoded payloads for private requests.
//!
//! The bytes hashed into the signature and the bytes sent as the POST body
//! must be identical, so both come from [`RequestPayload::encode`].

use serde::Serialize;

use crate::error::KrakenError;

/// Field name carrying the nonce.
pub const NONCE_FIELD: &str = "nonce";
/// Field name carrying the two-factor password.
pub const OTP_FIELD: &str = "otp";

/// Ordered form fields of a private request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPayload {
    fields: Vec<(String, String)>,
}

impl RequestPayload {
    /// Build a payload with `nonce` first, then the fields of `params`, then
    /// `otp` when given.
    pub fn new<P>(nonce: u64, params: &P, otp: Option<&str>) -> Result<Self, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let encoded = serde_urlencoded::to_string(params)
            .map_err(|e| KrakenError::Signing(format!("Cannot encode request body: {e}")))?;
        let body: Vec<(String, String)> = serde_urlencoded::from_str(&encoded)
            .map_err(|e| KrakenError::Signing(format!("Cannot encode request body: {e}")))?;

        let mut fields = Vec::with_capacity(body.len() + 2);
        fields.push((NONCE_FIELD.to_string(), nonce.to_string()));
        fields.extend(
            body.into_iter()
                .filter(|(key, _)| key != NONCE_FIELD && key != OTP_FIELD),
        );
        if let Some(otp) = otp {
            fields.push((OTP_FIELD.to_string(), otp.to_string()));
        }

        Ok(Self { fields })
    }

    /// Parse an already form-encoded body, keeping its field order.
    pub fn from_encoded(data: &str) -> Result<Self, KrakenError> {
        let fields = serde_urlencoded::from_str(data)
            .map_err(|e| KrakenError::Signing(format!("Malformed form data: {e}")))?;
        Ok(Self { fields })
    }

    /// Append a field.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.fields.push((key.into(), value.to_string()));
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The nonce carried by this payload.
    pub fn nonce(&self) -> Result<u64, KrakenError> {
        let raw = self
            .get(NONCE_FIELD)
            .ok_or_else(|| KrakenError::Signing("Payload has no nonce field".to_string()))?;
        raw.parse()
            .map_err(|_| KrakenError::Signing(format!("Nonce is not an unsigned integer: {raw}")))
    }

    /// Form-encode the fields in order.
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.fields {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Order<'a> {
        #[serde(rename = "type")]
        side: &'a str,
        pair: &'a str,
        volume: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<&'a str>,
    }

    #[test]
    fn test_nonce_first_then_fields_in_order() {
        let order = Order {
            side: "sell",
            pair: "USDTZUSD",
            volume: "100.00000000",
            price: None,
        };
        let payload = RequestPayload::new(1616492376594, &order, None).unwrap();
        assert_eq!(
            payload.encode(),
            "nonce=1616492376594&type=sell&pair=USDTZUSD&volume=100.00000000"
        );
    }

    #[test]
    fn test_otp_appended_last() {
        #[derive(Serialize)]
        struct Empty {}
        let payload = RequestPayload::new(42, &Empty {}, Some("123456")).unwrap();
        assert_eq!(payload.encode(), "nonce=42&otp=123456");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut payload = RequestPayload::default();
        payload.push("nonce", 1);
        payload.push("key", "my bank & co");
        assert_eq!(payload.encode(), "nonce=1&key=my+bank+%26+co");
    }

    #[test]
    fn test_from_encoded_round_trips() {
        let data = "nonce=1616492376594&ordertype=limit&pair=XBTUSD&price=37500&type=buy&volume=1.25";
        let payload = RequestPayload::from_encoded(data).unwrap();
        assert_eq!(payload.encode(), data);
        assert_eq!(payload.nonce().unwrap(), 1616492376594);
    }

    #[test]
    fn test_missing_nonce() {
        let payload = RequestPayload::from_encoded("asset=ZUSD").unwrap();
        assert!(matches!(payload.nonce(), Err(KrakenError::Signing(_))));
    }

    #[test]
    fn test_non_numeric_nonce() {
        let payload = RequestPayload::from_encoded("nonce=abc").unwrap();
        assert!(matches!(payload.nonce(), Err(KrakenError::Signing(_))));
    }
}
