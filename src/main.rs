use std::process::ExitCode;

use kraken_cashout::cashout::Cashout;
use kraken_cashout::config::Settings;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(base_url = %settings.base_url, "starting cashout");

    let cashout = Cashout::new(settings.client(), settings.cashout);
    match cashout.run().await {
        Ok(report) => {
            info!(
                sell_balance = %report.sell_balance,
                fiat_balance = %report.fiat_balance,
                order = ?report.order.as_ref().map(|order| &order.descr.order),
                withdrawal = ?report.withdrawal.as_ref().map(|w| &w.ref_id),
                "cashout finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("cashout failed: {e}");
            ExitCode::FAILURE
        }
    }
}
