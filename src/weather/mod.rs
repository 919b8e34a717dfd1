// Weather provider module.
// Forecast model and the client that fetches it.

pub mod client;
pub mod types;

pub use client::{FORECAST_HORIZON_DAYS, ForecastProvider, WeatherApiClient};
pub use types::Forecast;
