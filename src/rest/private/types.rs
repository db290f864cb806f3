//! Request and response types for private REST endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{BuySell, OrderType};

/// Request to add an order.
///
/// Amounts are decimal strings so they are sent exactly as formatted from
/// base units.
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    /// Order side (buy/sell).
    #[serde(rename = "type")]
    pub side: BuySell,
    /// Order type.
    pub ordertype: OrderType,
    /// Asset pair.
    pub pair: String,
    /// Order volume in the base asset.
    pub volume: String,
}

impl AddOrderRequest {
    /// Create a new order request.
    pub fn new(
        side: BuySell,
        ordertype: OrderType,
        pair: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            side,
            ordertype,
            pair: pair.into(),
            volume: volume.into(),
        }
    }

    /// Market sell of `volume` on `pair`.
    pub fn market_sell(pair: impl Into<String>, volume: impl Into<String>) -> Self {
        Self::new(BuySell::Sell, OrderType::Market, pair, volume)
    }
}

/// Add order response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddOrderResponse {
    /// Order description.
    pub descr: AddOrderDescription,
    /// Transaction IDs (if order was submitted).
    #[serde(default)]
    pub txid: Option<Vec<String>>,
}

/// Add order description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddOrderDescription {
    /// Order description.
    pub order: String,
    /// Close order description.
    #[serde(default)]
    pub close: Option<String>,
}

/// Request for available withdrawal methods.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WithdrawMethodsRequest {
    /// Asset (e.g., "ZUSD", "USDT").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

impl WithdrawMethodsRequest {
    /// Methods for a single asset.
    pub fn for_asset(asset: impl Into<String>) -> Self {
        Self {
            asset: Some(asset.into()),
        }
    }
}

/// Withdrawal method details.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawMethod {
    /// Asset name.
    pub asset: String,
    /// Method name.
    pub method: String,
    /// Network name.
    #[serde(default)]
    pub network: Option<String>,
    /// Minimum withdrawal amount.
    pub minimum: Decimal,
}

/// Request to withdraw funds to a named destination.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawRequest {
    /// Asset to withdraw.
    pub asset: String,
    /// Name of the withdrawal destination configured on the account.
    pub key: String,
    /// Amount to withdraw, as a decimal string.
    pub amount: String,
}

impl WithdrawRequest {
    /// Create a new withdrawal request.
    pub fn new(
        asset: impl Into<String>,
        key: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            key: key.into(),
            amount: amount.into(),
        }
    }
}

/// Confirmation response containing a ref id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmationRefId {
    /// Reference ID.
    #[serde(rename = "refid")]
    pub ref_id: String,
}
