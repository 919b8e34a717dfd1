// Process configuration.
// Reads secrets and paths from the environment (optionally seeded from a .env file).

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::paths;

pub const DISCORD_TOKEN_VAR: &str = "DISCORD_TOKEN";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
const LEGACY_API_KEY_VAR: &str = "API_KEY";
pub const STORE_PATH_VAR: &str = "TRACKED_FORECASTS_PATH";
pub const WEATHER_BASE_URL_VAR: &str = "WEATHER_API_BASE_URL";

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weatherapi.com";

/// Startup configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// WeatherAPI.com key.
    pub weather_api_key: String,
    /// Base URL of the weather provider.
    pub weather_base_url: String,
    /// Location of the tracked-forecast JSON file.
    pub store_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let discord_token =
            get(DISCORD_TOKEN_VAR).ok_or(ConfigError::MissingVar(DISCORD_TOKEN_VAR))?;
        let weather_api_key = get(WEATHER_API_KEY_VAR)
            .or_else(|| get(LEGACY_API_KEY_VAR))
            .ok_or(ConfigError::MissingVar(WEATHER_API_KEY_VAR))?;

        let weather_base_url = get(WEATHER_BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string());

        let store_path = get(STORE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(paths::default_store_path);

        Ok(Self {
            discord_token,
            weather_api_key,
            weather_base_url,
            store_path,
        })
    }
}
