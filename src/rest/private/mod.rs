//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::rest::endpoints::private;

#[derive(serde::Serialize)]
struct Empty {}

impl KrakenRestClient {
    /// Get account balance.
    ///
    /// Returns the balance of every asset held, as decimal strings keyed by
    /// asset code. Assets never held are absent from the map.
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
    ///         .credentials(Credentials::new("key", "c2VjcmV0"))
    ///         .build();
    ///
    ///     for (asset, balance) in client.get_account_balance().await? {
    ///         println!("{}: {}", asset, balance);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_account_balance(&self) -> Result<HashMap<String, String>, KrakenError> {
        self.private_request(private::BALANCE, &Empty {}).await
    }

    /// Add a new order.
    pub async fn add_order(
        &self,
        request: &AddOrderRequest,
    ) -> Result<AddOrderResponse, KrakenError> {
        self.private_request(private::ADD_ORDER, request).await
    }

    /// Get available withdrawal methods.
    pub async fn get_withdraw_methods(
        &self,
        request: Option<&WithdrawMethodsRequest>,
    ) -> Result<Vec<WithdrawMethod>, KrakenError> {
        match request {
            Some(req) => self.private_request(private::WITHDRAW_METHODS, req).await,
            None => self.private_request(private::WITHDRAW_METHODS, &Empty {}).await,
        }
    }

    /// Withdraw funds to a named destination.
    pub async fn withdraw_funds(
        &self,
        request: &WithdrawRequest,
    ) -> Result<ConfirmationRefId, KrakenError> {
        self.private_request(private::WITHDRAW, request).await
    }
}
