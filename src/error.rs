// Error types for golfcast.
// Covers command input, weather provider, tracked-forecast storage, and startup configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// A command that could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("missing arguments for !{command}")]
    MissingArguments { command: &'static str },

    #[error("Invalid date format. Please use one of the following formats: YYYY-MM-DD, MM/DD/YYYY")]
    InvalidDate(String),
}

/// Failure to obtain a forecast from the weather provider.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Date {date} is outside the {horizon_days}-day forecast window")]
    DateOutOfRange { date: NaiveDate, horizon_days: i64 },

    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl From<reqwest::Error> for ForecastError {
    fn from(err: reqwest::Error) -> Self {
        ForecastError::ProviderUnavailable(err.to_string())
    }
}

/// Failure to read or write the tracked-forecast file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid or missing process configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),
}

/// Top-level error surfaced from `main`.
#[derive(Error, Debug)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Discord client error: {0}")]
    Discord(#[from] serenity::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
