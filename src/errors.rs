use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No OpenWeatherMap API key configured (set OPENWEATHER_API_KEY or pass --api-key)")]
    MissingApiKey,
    #[error("City name must not be empty")]
    EmptyCity,
    #[error("Country code '{0}' is not a two-letter ISO code")]
    InvalidCountryCode(String),
    #[error("Invalid value '{value}' for {var}: {message}")]
    InvalidEnvValue {
        var: String,
        value: String,
        message: String,
    },
    #[error("Reading count must be at least 1")]
    ZeroReadings,
}

/// Failures while fetching or decoding a forecast.
///
/// None of these are fatal: the advisor turns every variant into
/// [`crate::weather::WeatherOutcome::NoData`].
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Forecast API rejected the API key (HTTP 401)")]
    Unauthorized,
    #[error("City '{city}' not found by the forecast API (HTTP 404)")]
    CityNotFound { city: String },
    #[error("Forecast API returned HTTP {0}")]
    Status(u16),
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Malformed forecast payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Forecast payload contains no forecast points")]
    EmptyForecast,
    #[error("Forecast point has an out-of-range timestamp: {0}")]
    InvalidTimestamp(i64),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl WeatherError {
    /// Operator hint printed next to the error, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WeatherError::Unauthorized => Some("Check your API key; it may be invalid or not yet activated."),
            WeatherError::CityNotFound { .. } => Some("Check the city spelling and the country code."),
            WeatherError::Config(ConfigError::MissingApiKey) => {
                Some("Get a key at https://openweathermap.org/api")
            }
            _ => None,
        }
    }
}
