//! The sell-then-withdraw workflow.
//!
//! A strictly linear pipeline: check the sell asset's balance, market-sell
//! all of it when non-zero, wait for settlement, check the fiat balance and
//! withdraw all of it when it reaches the configured minimum. The first
//! failure aborts the remaining steps; nothing is retried or rolled back.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use crate::amount::Amount;
use crate::error::KrakenError;
use crate::rest::KrakenClient;
use crate::rest::private::{AddOrderRequest, AddOrderResponse, ConfirmationRefId, WithdrawRequest};
use crate::types::{AssetSpec, usdt, zusd};

/// Default pause between selling and re-reading the fiat balance.
pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_secs(5);

/// Market the sell asset is sold on.
pub const DEFAULT_PAIR: &str = "USDTZUSD";

/// Parameters of one cashout run.
#[derive(Debug, Clone)]
pub struct CashoutConfig {
    /// Asset sold in full when its balance is non-zero.
    pub sell_asset: AssetSpec,
    /// Asset received from the sale and withdrawn.
    pub fiat_asset: AssetSpec,
    /// Pair the market sell is placed on.
    pub pair: String,
    /// Smallest fiat balance worth withdrawing, at the fiat asset's scale.
    pub min_withdrawal: Amount,
    /// Name of the withdrawal destination configured on the account.
    pub withdrawal_key: String,
    /// Blind wait after a sell before the fiat balance is checked.
    pub settlement_delay: Duration,
}

impl CashoutConfig {
    /// USDT to ZUSD with the default pair and settlement delay.
    ///
    /// `min_withdrawal` is a decimal fiat amount such as `"10"`.
    pub fn new(
        withdrawal_key: impl Into<String>,
        min_withdrawal: &str,
    ) -> Result<Self, KrakenError> {
        let fiat_asset = zusd();
        Ok(Self {
            min_withdrawal: Amount::parse(min_withdrawal, fiat_asset.scale)?,
            sell_asset: usdt(),
            fiat_asset,
            pair: DEFAULT_PAIR.to_string(),
            withdrawal_key: withdrawal_key.into(),
            settlement_delay: DEFAULT_SETTLEMENT_DELAY,
        })
    }

    /// Override the settlement delay.
    pub fn settlement_delay(mut self, delay: Duration) -> Self {
        self.settlement_delay = delay;
        self
    }
}

/// Steps of a run, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashoutStage {
    CheckingSellBalance,
    Selling,
    CheckingWithdrawBalance,
    Withdrawing,
    Done,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct CashoutReport {
    /// Sell asset balance found at the start.
    pub sell_balance: Amount,
    /// The sell order, when one was placed.
    pub order: Option<AddOrderResponse>,
    /// Fiat balance found after the sell step.
    pub fiat_balance: Amount,
    /// The withdrawal, when one was issued.
    pub withdrawal: Option<ConfirmationRefId>,
    /// Stages visited, in order.
    pub stages: Vec<CashoutStage>,
}

/// Runs the workflow against a [`KrakenClient`].
pub struct Cashout<C> {
    client: C,
    config: CashoutConfig,
}

impl<C: KrakenClient> Cashout<C> {
    pub fn new(client: C, config: CashoutConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &CashoutConfig {
        &self.config
    }

    /// Execute every step once.
    pub async fn run(&self) -> Result<CashoutReport, KrakenError> {
        let config = &self.config;
        let mut stages = vec![CashoutStage::CheckingSellBalance];

        let balances = self.client.get_account_balance().await?;
        let sell_balance = balance_of(&balances, &config.sell_asset)?;
        info!(asset = %config.sell_asset.code, balance = %sell_balance, "sell balance");

        let order = if sell_balance.is_zero() {
            info!(asset = %config.sell_asset.code, "nothing to sell");
            None
        } else {
            stages.push(CashoutStage::Selling);
            let request = AddOrderRequest::market_sell(&config.pair, sell_balance.to_string());
            let response = self.client.add_order(&request).await?;
            info!(order = %response.descr.order, txid = ?response.txid, "sell order placed");

            info!(delay = ?config.settlement_delay, "waiting for settlement");
            tokio::time::sleep(config.settlement_delay).await;
            Some(response)
        };

        stages.push(CashoutStage::CheckingWithdrawBalance);
        let balances = self.client.get_account_balance().await?;
        let fiat_balance = balance_of(&balances, &config.fiat_asset)?;
        info!(asset = %config.fiat_asset.code, balance = %fiat_balance, "fiat balance");

        let withdrawal = if fiat_balance.try_cmp(&config.min_withdrawal)? == Ordering::Less {
            warn!(
                balance = %fiat_balance,
                minimum = %config.min_withdrawal,
                "fiat balance below minimum withdrawal"
            );
            None
        } else {
            stages.push(CashoutStage::Withdrawing);
            let request = WithdrawRequest::new(
                &config.fiat_asset.code,
                &config.withdrawal_key,
                fiat_balance.to_string(),
            );
            let confirmation = self.client.withdraw_funds(&request).await?;
            info!(refid = %confirmation.ref_id, amount = %fiat_balance, "withdrawal issued");
            Some(confirmation)
        };

        stages.push(CashoutStage::Done);
        Ok(CashoutReport {
            sell_balance,
            order,
            fiat_balance,
            withdrawal,
            stages,
        })
    }
}

/// Balance of `asset` in base units; assets absent from the map hold zero.
fn balance_of(
    balances: &HashMap<String, String>,
    asset: &AssetSpec,
) -> Result<Amount, KrakenError> {
    match balances.get(&asset.code) {
        Some(value) => Amount::parse(value, asset.scale),
        None => Ok(Amount::zero(asset.scale)),
    }
}
