// Forecast types.
// The bot's forecast model plus the WeatherAPI.com response shapes it is parsed from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather for one location on one day. Temperatures in °F, wind in mph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub date: NaiveDate,
    /// Daily average temperature.
    pub temperature: f64,
    pub high: f64,
    pub low: f64,
    /// Provider condition text, e.g. "Sunny" or "Patchy rain possible".
    pub condition: String,
    /// Average relative humidity, 0-100.
    pub humidity: u8,
    /// Maximum wind speed.
    pub wind_speed: f64,
    /// Daily chance of rain, 0-100.
    pub rain_chance: u8,
}

/// Clamp a provider percentage into `0..=100`.
pub fn percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Top-level `forecast.json` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub location: Option<ApiLocation>,
    pub forecast: ApiForecast,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLocation {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecast {
    #[serde(rename = "forecastday", default)]
    pub forecast_day: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiForecastDay {
    pub date: Option<NaiveDate>,
    pub day: ApiDay,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDay {
    #[serde(rename = "maxtemp_f")]
    pub max_temp_f: f64,
    #[serde(rename = "mintemp_f")]
    pub min_temp_f: f64,
    #[serde(rename = "avgtemp_f")]
    pub avg_temp_f: f64,
    #[serde(rename = "maxwind_mph")]
    pub max_wind_mph: f64,
    #[serde(rename = "avghumidity")]
    pub avg_humidity: f64,
    #[serde(default)]
    pub daily_chance_of_rain: f64,
    pub condition: ApiCondition,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    pub text: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub code: u32,
    pub message: String,
}

/// Provider error code for "No matching location found."
pub(crate) const NO_MATCHING_LOCATION: u32 = 1006;

impl ForecastResponse {
    /// Convert the first forecast day into a [`Forecast`].
    pub fn into_forecast(self, query: &str, requested: NaiveDate) -> Option<Forecast> {
        let day = self.forecast.forecast_day.into_iter().next()?;
        let location = self
            .location
            .map(|l| l.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| query.to_string());

        Some(Forecast {
            location,
            date: day.date.unwrap_or(requested),
            temperature: day.day.avg_temp_f,
            high: day.day.max_temp_f,
            low: day.day.min_temp_f,
            condition: day.day.condition.text.trim().to_string(),
            humidity: percent(day.day.avg_humidity),
            wind_speed: day.day.max_wind_mph,
            rain_chance: percent(day.day.daily_chance_of_rain),
        })
    }
}
