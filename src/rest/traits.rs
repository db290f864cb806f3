//! Trait definition for the Kraken REST API client.
//!
//! The cashout workflow is generic over [`KrakenClient`], so it can run
//! against [`KrakenRestClient`](crate::rest::KrakenRestClient) or an
//! in-memory implementation in tests.

use std::collections::HashMap;
use std::future::Future;

use crate::error::KrakenError;
use crate::rest::private::{
    AddOrderRequest, AddOrderResponse, ConfirmationRefId, WithdrawMethod, WithdrawMethodsRequest,
    WithdrawRequest,
};
use crate::rest::public::{ServerTime, SystemStatus};

/// Kraken REST operations used by this crate.
///
/// All methods are async and return `Result<T, KrakenError>`.
pub trait KrakenClient: Send + Sync {
    // ========== Public Endpoints ==========

    /// Get the server time.
    fn get_server_time(&self) -> impl Future<Output = Result<ServerTime, KrakenError>> + Send;

    /// Get the system status.
    fn get_system_status(&self) -> impl Future<Output = Result<SystemStatus, KrakenError>> + Send;

    // ========== Private Endpoints ==========

    /// Get account balances as decimal strings keyed by asset code.
    fn get_account_balance(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, String>, KrakenError>> + Send;

    /// Add a new order.
    fn add_order(
        &self,
        request: &AddOrderRequest,
    ) -> impl Future<Output = Result<AddOrderResponse, KrakenError>> + Send;

    /// Withdraw funds to a named destination.
    fn withdraw_funds(
        &self,
        request: &WithdrawRequest,
    ) -> impl Future<Output = Result<ConfirmationRefId, KrakenError>> + Send;

    /// Get available withdrawal methods.
    fn get_withdraw_methods(
        &self,
        request: Option<&WithdrawMethodsRequest>,
    ) -> impl Future<Output = Result<Vec<WithdrawMethod>, KrakenError>> + Send;
}
