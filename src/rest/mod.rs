//! Kraken REST API client.
//!
//! Private endpoints are signed POSTs, public endpoints plain GETs; both
//! unwrap Kraken's `{error, result}` envelope the same way.

mod client;
mod endpoints;
pub mod private;
pub mod public;
mod traits;

pub use client::{KrakenRestClient, KrakenRestClientBuilder};
pub use endpoints::*;
pub use traits::KrakenClient;
