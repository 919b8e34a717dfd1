// golfcast entry point.
// Loads configuration, wires the forecast client and tracked store, and runs the Discord client.

mod bot;
mod config;
mod error;
mod golf;
mod store;
mod weather;

use std::sync::Arc;

use serenity::Client;
use tracing_subscriber::EnvFilter;

use crate::bot::{Dispatcher, Handler};
use crate::config::Config;
use crate::error::Result;
use crate::store::TrackedStore;
use crate::weather::WeatherApiClient;

const DEFAULT_LOG_FILTER: &str = "golfcast=info,serenity=warn";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env().inspect_err(|e| tracing::error!("{}", e))?;
    tracing::info!(store = %config.store_path.display(), "Starting golfcast");

    let store = TrackedStore::load(&config.store_path);
    let provider = WeatherApiClient::new(&config.weather_api_key, &config.weather_base_url)?;
    let dispatcher = Arc::new(Dispatcher::new(provider, store));

    let mut client = Client::builder(&config.discord_token, bot::handler::intents())
        .event_handler(Handler::new(dispatcher))
        .await?;

    tracing::info!("Connecting to Discord");
    client.start().await?;

    Ok(())
}
