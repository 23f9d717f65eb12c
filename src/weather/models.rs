//! Wire format of the OpenWeatherMap 5 day / 3 hour forecast endpoint and the
//! domain [`ForecastPoint`] derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::WeatherError;

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: Option<CityInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    /// Probability of precipitation, 0.0 - 1.0.
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub rain: Option<RainBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDescription {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RainBlock {
    #[serde(rename = "3h", default)]
    pub three_hours_mm: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CityInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: f64,
    pub description: String,
    pub precipitation_probability_pct: f64,
    pub rain_volume_mm: f64,
}

impl TryFrom<&ForecastEntry> for ForecastPoint {
    type Error = WeatherError;

    fn try_from(entry: &ForecastEntry) -> Result<Self, Self::Error> {
        let timestamp =
            DateTime::from_timestamp(entry.dt, 0).ok_or(WeatherError::InvalidTimestamp(entry.dt))?;

        Ok(Self {
            timestamp,
            temperature: entry.main.temp,
            feels_like: entry.main.feels_like,
            humidity_pct: entry.main.humidity,
            description: entry
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
            precipitation_probability_pct: entry.pop.unwrap_or(0.0) * 100.0,
            rain_volume_mm: entry
                .rain
                .as_ref()
                .and_then(|r| r.three_hours_mm)
                .unwrap_or(0.0),
        })
    }
}

impl ForecastResponse {
    /// Converts every entry, failing on the first bad one.
    pub fn points(&self) -> Result<Vec<ForecastPoint>, WeatherError> {
        self.list.iter().map(ForecastPoint::try_from).collect()
    }
}
