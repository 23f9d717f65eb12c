use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::irrigation::NoDataPolicy;
use crate::weather::Location;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub weather: WeatherConfig,
    pub sensors: SensorConfig,
    pub no_data_policy: NoDataPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub city: String,
    pub country_code: String,
    pub units: String,
    pub language: String,
    pub base_url: String,
    pub forecast_count: u8,
    pub timeout_secs: u64,
    pub thresholds: RainThresholds,
}

/// Limits used when scanning the forecast for rain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainThresholds {
    pub window_hours: u32,
    pub step_hours: u32,
    pub probability_pct: f64,
    pub volume_mm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub reading_count: usize,
    pub interval_minutes: i64,
    pub pump_humidity_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            sensors: SensorConfig::default(),
            no_data_policy: NoDataPolicy::Withhold,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            city: String::from("Sao Paulo"),
            country_code: String::from("BR"),
            units: String::from("metric"),
            language: String::from("pt_br"),
            base_url: String::from(DEFAULT_BASE_URL),
            forecast_count: 8, // 8 x 3h = next 24 hours
            timeout_secs: 30,
            thresholds: RainThresholds::default(),
        }
    }
}

impl Default for RainThresholds {
    fn default() -> Self {
        Self {
            window_hours: 6,
            step_hours: 3,
            probability_pct: 50.0,
            volume_mm: 0.5,
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            reading_count: 20,
            interval_minutes: 5,
            pump_humidity_threshold: 50.0,
        }
    }
}

impl RainThresholds {
    /// Number of leading forecast points that fall inside the inspection window.
    pub fn inspected_points(&self) -> usize {
        if self.step_hours == 0 {
            return 0;
        }
        self.window_hours.div_ceil(self.step_hours) as usize
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from defaults overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("OPENWEATHER_API_KEY") {
            config.weather.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENWEATHER_BASE_URL") {
            config.weather.base_url = url;
        }
        if let Some(city) = lookup("FARMTECH_CITY") {
            config.weather.city = city;
        }
        if let Some(country) = lookup("FARMTECH_COUNTRY") {
            config.weather.country_code = country;
        }
        if let Some(units) = lookup("FARMTECH_UNITS") {
            config.weather.units = units;
        }
        if let Some(lang) = lookup("FARMTECH_LANG") {
            config.weather.language = lang;
        }
        if let Some(timeout) = lookup("FARMTECH_HTTP_TIMEOUT_SECS") {
            config.weather.timeout_secs = parse_var("FARMTECH_HTTP_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(count) = lookup("FARMTECH_SENSOR_READINGS") {
            config.sensors.reading_count = parse_var("FARMTECH_SENSOR_READINGS", &count)?;
        }
        if let Some(policy) = lookup("FARMTECH_NO_DATA_POLICY") {
            config.no_data_policy = parse_var("FARMTECH_NO_DATA_POLICY", &policy)?;
        }

        Ok(config)
    }
}

impl WeatherConfig {
    /// Returns the API key, rejecting absent or blank values.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    pub fn location(&self) -> Result<Location, ConfigError> {
        Location::new(&self.city, &self.country_code)
    }
}

impl SensorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reading_count == 0 {
            return Err(ConfigError::ZeroReadings);
        }
        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_match_dashboard() {
        let config = Config::default();
        assert_eq!(config.weather.city, "Sao Paulo");
        assert_eq!(config.weather.country_code, "BR");
        assert_eq!(config.weather.forecast_count, 8);
        assert_eq!(config.sensors.reading_count, 20);
        assert_eq!(config.no_data_policy, NoDataPolicy::Withhold);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_inspected_points_rounds_up() {
        assert_eq!(RainThresholds::default().inspected_points(), 2);

        let odd = RainThresholds { window_hours: 7, ..RainThresholds::default() };
        assert_eq!(odd.inspected_points(), 3);

        let zero_step = RainThresholds { step_hours: 0, ..RainThresholds::default() };
        assert_eq!(zero_step.inspected_points(), 0);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENWEATHER_API_KEY", "abc123"),
            ("FARMTECH_CITY", "Campinas"),
            ("FARMTECH_SENSOR_READINGS", "12"),
            ("FARMTECH_NO_DATA_POLICY", "proceed"),
        ]))
        .unwrap();

        assert_eq!(config.weather.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.weather.city, "Campinas");
        assert_eq!(config.sensors.reading_count, 12);
        assert_eq!(config.no_data_policy, NoDataPolicy::Proceed);
    }

    #[test]
    fn test_invalid_env_value() {
        let result = Config::from_lookup(lookup_from(&[("FARMTECH_SENSOR_READINGS", "many")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue { ref var, .. }) if var == "FARMTECH_SENSOR_READINGS"
        ));
    }

    #[test]
    fn test_api_key_required() {
        let mut weather = WeatherConfig::default();
        assert!(matches!(weather.require_api_key(), Err(ConfigError::MissingApiKey)));

        weather.api_key = Some("   ".to_string());
        assert!(matches!(weather.require_api_key(), Err(ConfigError::MissingApiKey)));

        weather.api_key = Some(" key ".to_string());
        assert_eq!(weather.require_api_key().unwrap(), "key");
    }

    #[test]
    fn test_zero_readings_rejected() {
        let sensors = SensorConfig { reading_count: 0, ..SensorConfig::default() };
        assert!(matches!(sensors.validate(), Err(ConfigError::ZeroReadings)));
        assert!(SensorConfig::default().validate().is_ok());
    }
}
