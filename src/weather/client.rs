// WeatherAPI.com HTTP client.
// Fetches a single day's forecast and maps provider failures onto ForecastError.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::{Client, Response, StatusCode};

use crate::error::ForecastError;

use super::types::{ApiErrorResponse, Forecast, ForecastResponse, NO_MATCHING_LOCATION};

/// Days ahead of today the provider will forecast.
pub const FORECAST_HORIZON_DAYS: i64 = 14;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("golfcast/", env!("CARGO_PKG_VERSION"));

/// Source of daily forecasts.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn get_forecast(&self, location: &str, date: NaiveDate)
    -> Result<Forecast, ForecastError>;
}

/// Check that `date` falls within `today..=today + FORECAST_HORIZON_DAYS`.
pub fn check_horizon(date: NaiveDate, today: NaiveDate) -> Result<(), ForecastError> {
    let days_ahead = (date - today).num_days();
    if !(0..=FORECAST_HORIZON_DAYS).contains(&days_ahead) {
        return Err(ForecastError::DateOutOfRange {
            date,
            horizon_days: FORECAST_HORIZON_DAYS,
        });
    }
    Ok(())
}

/// Client for the WeatherAPI.com `forecast.json` endpoint.
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a new client against `base_url` (e.g. `https://api.weatherapi.com`).
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ForecastError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, location: &str, date: NaiveDate) -> Result<Forecast, ForecastError> {
        let url = format!("{}/v1/forecast.json", self.base_url);
        let dt = date.format("%Y-%m-%d").to_string();
        let params = [
            ("key", self.api_key.as_str()),
            ("q", location),
            ("dt", dt.as_str()),
            ("aqi", "no"),
            ("alerts", "no"),
        ];

        tracing::debug!(%location, %date, "Requesting forecast");
        let response = self.client.get(&url).query(&params).send().await?;
        let response = check_response(response, location).await?;

        let body: ForecastResponse = response.json().await?;
        body.into_forecast(location, date)
            .ok_or(ForecastError::DateOutOfRange {
                date,
                horizon_days: FORECAST_HORIZON_DAYS,
            })
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiClient {
    async fn get_forecast(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Forecast, ForecastError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(ForecastError::LocationNotFound(String::new()));
        }
        check_horizon(date, Local::now().date_naive())?;

        self.fetch(location, date).await
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response, location: &str) -> Result<Response, ForecastError> {
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::BAD_REQUEST => {
            let text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(body) if body.error.code == NO_MATCHING_LOCATION => {
                    Err(ForecastError::LocationNotFound(location.to_string()))
                }
                Ok(body) => Err(ForecastError::ProviderUnavailable(body.error.message)),
                Err(_) => Err(ForecastError::ProviderUnavailable(format!(
                    "HTTP 400: {}",
                    text
                ))),
            }
        }
        status => {
            tracing::warn!(%status, "Weather provider returned an error");
            Err(ForecastError::ProviderUnavailable(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tomorrow() -> NaiveDate {
        Local::now().date_naive() + Days::new(1)
    }

    fn forecast_body(date: NaiveDate) -> serde_json::Value {
        serde_json::json!({
            "location": {"name": "Boston"},
            "forecast": {"forecastday": [{
                "date": date.format("%Y-%m-%d").to_string(),
                "day": {
                    "maxtemp_f": 81.0,
                    "mintemp_f": 65.0,
                    "avgtemp_f": 75.0,
                    "maxwind_mph": 8.0,
                    "avghumidity": 140,
                    "daily_chance_of_rain": 5,
                    "condition": {"text": "Sunny"}
                }
            }]}
        })
    }

    #[test]
    fn test_check_horizon() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(check_horizon(today, today).is_ok());
        assert!(check_horizon(today + Days::new(14), today).is_ok());
        assert!(matches!(
            check_horizon(today + Days::new(15), today),
            Err(ForecastError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            check_horizon(today - Days::new(1), today),
            Err(ForecastError::DateOutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_forecast() {
        let mock_server = MockServer::start().await;
        let date = tomorrow();

        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .and(query_param("key", "test_key"))
            .and(query_param("q", "Boston"))
            .and(query_param("dt", date.format("%Y-%m-%d").to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(date)))
            .mount(&mock_server)
            .await;

        let client = WeatherApiClient::new("test_key", &mock_server.uri()).unwrap();
        let forecast = client.get_forecast("Boston", date).await.unwrap();

        assert_eq!(forecast.location, "Boston");
        assert_eq!(forecast.temperature, 75.0);
        assert_eq!(forecast.condition, "Sunny");
        assert_eq!(forecast.humidity, 100);
        assert_eq!(forecast.rain_chance, 5);
    }

    #[tokio::test]
    async fn test_unknown_location() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 1006, "message": "No matching location found."}
            })))
            .mount(&mock_server)
            .await;

        let client = WeatherApiClient::new("test_key", &mock_server.uri()).unwrap();
        let err = client.get_forecast("Nowhereville", tomorrow()).await.unwrap_err();
        assert!(matches!(err, ForecastError::LocationNotFound(ref l) if l == "Nowhereville"));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = WeatherApiClient::new("test_key", &mock_server.uri()).unwrap();
        let err = client.get_forecast("Boston", tomorrow()).await.unwrap_err();
        assert!(matches!(err, ForecastError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_forecast_days() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"forecast": {"forecastday": []}})),
            )
            .mount(&mock_server)
            .await;

        let client = WeatherApiClient::new("test_key", &mock_server.uri()).unwrap();
        let err = client.get_forecast("Boston", tomorrow()).await.unwrap_err();
        assert!(matches!(err, ForecastError::DateOutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_out_of_range_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = WeatherApiClient::new("test_key", &mock_server.uri()).unwrap();
        let far = Local::now().date_naive() + Days::new(30);
        let err = client.get_forecast("Boston", far).await.unwrap_err();
        assert!(matches!(err, ForecastError::DateOutOfRange { .. }));

        let err = client.get_forecast("   ", tomorrow()).await.unwrap_err();
        assert!(matches!(err, ForecastError::LocationNotFound(_)));
    }
}
