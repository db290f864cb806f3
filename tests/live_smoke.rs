use kraken_cashout::config::Settings;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_balance_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(_) => return Ok(()),
    };
    let client = settings.client();

    let status = client.get_system_status().await?;
    println!("System status: {}", status.status);

    let balances = client.get_account_balance().await?;
    println!("Assets held: {}", balances.len());

    Ok(())
}
