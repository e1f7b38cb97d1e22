use std::sync::Arc;

use tracing::{info, warn};
use twd_exchange_bot::{
    api::{start_server, ApiState},
    config::Config,
    line::LineClient,
    rates::RateClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    info!("TWD Exchange-Rate Bot starting");
    info!("Port: {}", config.port);

    let line = Arc::new(LineClient::new(config.channel_access_token.clone())?);
    let rates = Arc::new(RateClient::new(config.exchange_rate_api_url.clone())?);

    // Provisioning failure should not keep the webhook server down;
    // an older menu (or none) just stays in place.
    if let Err(e) = line.provision_rich_menu(&config.rich_menu_image).await {
        warn!("Rich menu provisioning failed: {}", e);
    }

    let state = ApiState {
        line,
        rates,
        channel_secret: config.channel_secret.clone(),
    };

    start_server(state, config.port).await?;

    Ok(())
}
