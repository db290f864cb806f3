//! Response types for public REST endpoints.

use serde::Deserialize;

/// Server time response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp.
    pub unixtime: i64,
    /// RFC 1123 formatted time string.
    pub rfc1123: String,
}

/// System status response.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// Current system status (`online`, `maintenance`, `cancel_only`, `post_only`).
    pub status: String,
    /// Current timestamp.
    pub timestamp: String,
}

impl SystemStatus {
    /// Whether the exchange accepts new orders and withdrawals.
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}
