//! Common domain types.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuySell {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for BuySell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuySell::Buy => write!(f, "buy"),
            BuySell::Sell => write!(f, "sell"),
        }
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order, filled immediately at the best available price
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
        }
    }
}

/// An asset code together with the number of fractional digits its
/// balances are reported with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    /// Kraken asset code (e.g. `USDT`, `ZUSD`).
    pub code: String,
    /// Fractional digits of the asset's balances.
    pub scale: u32,
}

impl AssetSpec {
    pub fn new(code: impl Into<String>, scale: u32) -> Self {
        Self {
            code: code.into(),
            scale,
        }
    }
}

/// Tether, reported with 8 fractional digits.
pub fn usdt() -> AssetSpec {
    AssetSpec::new("USDT", 8)
}

/// US dollar, reported with 4 fractional digits.
pub fn zusd() -> AssetSpec {
    AssetSpec::new("ZUSD", 4)
}
