//! Kraken REST API endpoint constants.

/// Base URL for the Kraken REST API.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Public endpoints (no authentication required).
pub mod public {
    /// Get server time.
    pub const TIME: &str = "/0/public/Time";
    /// Get system status.
    pub const SYSTEM_STATUS: &str = "/0/public/SystemStatus";
}

/// Private endpoints (authentication required).
pub mod private {
    /// Get account balance.
    pub const BALANCE: &str = "/0/private/Balance";
    /// Add order.
    pub const ADD_ORDER: &str = "/0/private/AddOrder";
    /// Get withdrawal methods.
    pub const WITHDRAW_METHODS: &str = "/0/private/WithdrawMethods";
    /// Withdraw funds.
    pub const WITHDRAW: &str = "/0/private/Withdraw";
}
