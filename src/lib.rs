//! # Kraken Cashout
//!
//! Sells a Kraken stablecoin balance for fiat and withdraws the proceeds
//! once they reach a minimum.
//!
//! ## Features
//!
//! - Signed private REST requests (HMAC-SHA512 over path and hashed body)
//! - Strictly increasing, millisecond-seeded nonces
//! - Exact decimal comparisons through integer base units
//! - A linear sell, settle, withdraw workflow over any [`rest::KrakenClient`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_cashout::cashout::Cashout;
//! use kraken_cashout::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let cashout = Cashout::new(settings.client(), settings.cashout.clone());
//!     let report = cashout.run().await?;
//!     println!("Withdrawal: {:?}", report.withdrawal);
//!     Ok(())
//! }
//! ```

pub mod amount;
pub mod auth;
pub mod cashout;
pub mod config;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use amount::Amount;
pub use error::KrakenError;
pub use types::{BuySell, OrderType};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
