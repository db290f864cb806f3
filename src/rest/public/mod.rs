//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::rest::endpoints::public;

impl KrakenRestClient {
    /// Get the server time.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use kraken_cashout::rest::KrakenRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KrakenRestClient::new();
    ///     let time = client.get_server_time().await?;
    ///     println!("Server time: {} ({})", time.unixtime, time.rfc1123);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ServerTime, KrakenError> {
        self.public_request::<_, ()>(public::TIME, None).await
    }

    /// Get the system status.
    pub async fn get_system_status(&self) -> Result<SystemStatus, KrakenError> {
        self.public_request::<_, ()>(public::SYSTEM_STATUS, None)
            .await
    }
}
