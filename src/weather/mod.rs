pub mod advisory;
pub mod client;
pub mod models;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use advisory::{evaluate_forecast, PointAssessment, WeatherAdvisor, WeatherAdvisory, WeatherOutcome};
pub use client::WeatherClient;
pub use models::{ForecastPoint, ForecastResponse};

/// City plus ISO 3166 alpha-2 country code, as the forecast API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country_code: String,
}

impl Location {
    pub fn new(city: &str, country_code: &str) -> Result<Self, ConfigError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ConfigError::EmptyCity);
        }

        let country_code = country_code.trim();
        if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCountryCode(country_code.to_string()));
        }

        Ok(Self {
            city: city.to_string(),
            country_code: country_code.to_ascii_uppercase(),
        })
    }

    /// Value of the `q` query parameter.
    pub fn query(&self) -> String {
        format!("{},{}", self.city, self.country_code)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country_code)
    }
}
