use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::WeatherConfig;
use crate::errors::WeatherError;
use crate::weather::models::ForecastResponse;
use crate::weather::Location;

pub struct WeatherClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    units: String,
    language: String,
    forecast_count: u8,
}

impl WeatherClient {
    /// Fails with `MissingApiKey` before anything touches the network.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config.require_api_key()?.to_string();

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
            language: config.language.clone(),
            forecast_count: config.forecast_count,
        })
    }

    /// Fetch the next `forecast_count` 3-hour forecast points for `location`.
    pub async fn fetch_forecast(&self, location: &Location) -> Result<ForecastResponse, WeatherError> {
        info!("Fetching forecast for {}", location);

        let params = [
            ("q", location.query()),
            ("appid", self.api_key.clone()),
            ("units", self.units.clone()),
            ("lang", self.language.clone()),
            ("cnt", self.forecast_count.to_string()),
        ];

        let response = self
            .http_client
            .get(format!("{}/forecast", self.base_url))
            .query(&params)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(WeatherError::Unauthorized),
            StatusCode::NOT_FOUND => {
                return Err(WeatherError::CityNotFound {
                    city: location.city.clone(),
                })
            }
            status => return Err(WeatherError::Status(status.as_u16())),
        }

        let body = response.text().await?;
        let forecast: ForecastResponse = serde_json::from_str(&body)?;

        if forecast.list.is_empty() {
            return Err(WeatherError::EmptyForecast);
        }

        debug!("Received {} forecast points", forecast.list.len());
        Ok(forecast)
    }
}
