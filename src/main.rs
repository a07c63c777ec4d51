use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use weatherwise::{AppState, ProviderClient, WeatherApiSource, WeatherwiseConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var_os("WEATHERWISE_CONFIG").map(PathBuf::from);
    let config = WeatherwiseConfig::load_from_path(config_path)?;
    logging::init(&config.logging)?;

    info!("Starting Weatherwise v{}", weatherwise::VERSION);

    let source = WeatherApiSource::new(&config.provider)
        .context("Failed to create weather provider client")?;
    let client = ProviderClient::new(Arc::new(source));

    web::run(&config.server, AppState::new(client))
        .await
        .context("Web server stopped unexpectedly")?;

    info!("Weatherwise stopped");
    Ok(())
}
