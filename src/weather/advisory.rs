use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{RainThresholds, WeatherConfig};
use crate::errors::WeatherError;
use crate::weather::client::WeatherClient;
use crate::weather::models::{CityInfo, ForecastPoint, ForecastResponse};
use crate::weather::Location;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointAssessment {
    pub point: ForecastPoint,
    pub rain_expected: bool,
}

/// Result of scanning the leading forecast points for rain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAdvisory {
    pub nearest: ForecastPoint,
    pub inspected: Vec<PointAssessment>,
    pub rain_expected: bool,
    pub city: Option<CityInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherOutcome {
    Available(WeatherAdvisory),
    NoData { reason: String },
}

impl WeatherOutcome {
    pub fn advisory(&self) -> Option<&WeatherAdvisory> {
        match self {
            WeatherOutcome::Available(advisory) => Some(advisory),
            WeatherOutcome::NoData { .. } => None,
        }
    }
}

pub fn point_triggers_rain(point: &ForecastPoint, thresholds: &RainThresholds) -> bool {
    point.precipitation_probability_pct > thresholds.probability_pct
        || point.rain_volume_mm > thresholds.volume_mm
}

/// Inspects the first `ceil(window / step)` points. Returns `None` for an
/// empty forecast, since there is no nearest point to report.
pub fn evaluate_forecast(
    points: &[ForecastPoint],
    thresholds: &RainThresholds,
    city: Option<CityInfo>,
) -> Option<WeatherAdvisory> {
    let nearest = points.first()?.clone();

    let inspected: Vec<PointAssessment> = points
        .iter()
        .take(thresholds.inspected_points())
        .map(|point| PointAssessment {
            point: point.clone(),
            rain_expected: point_triggers_rain(point, thresholds),
        })
        .collect();

    let rain_expected = inspected.iter().any(|a| a.rain_expected);

    Some(WeatherAdvisory {
        nearest,
        inspected,
        rain_expected,
        city,
    })
}

pub struct WeatherAdvisor {
    client: WeatherClient,
    thresholds: RainThresholds,
}

impl WeatherAdvisor {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Ok(Self {
            client: WeatherClient::new(config)?,
            thresholds: config.thresholds,
        })
    }

    /// Fetch and evaluate. Every failure becomes `NoData`; nothing here is fatal.
    pub async fn advise(&self, location: &Location) -> WeatherOutcome {
        match self.try_advise(location).await {
            Ok(advisory) => {
                info!(
                    "Forecast for {}: rain expected in next {}h = {}",
                    location, self.thresholds.window_hours, advisory.rain_expected
                );
                WeatherOutcome::Available(advisory)
            }
            Err(e) => {
                error!("Error fetching weather data: {}", e);
                if let Some(hint) = e.hint() {
                    warn!("{}", hint);
                }
                WeatherOutcome::NoData {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_advise(&self, location: &Location) -> Result<WeatherAdvisory, WeatherError> {
        let response = self.client.fetch_forecast(location).await?;
        advisory_from_response(&response, &self.thresholds)
    }
}

pub fn advisory_from_response(
    response: &ForecastResponse,
    thresholds: &RainThresholds,
) -> Result<WeatherAdvisory, WeatherError> {
    let points = response.points()?;
    evaluate_forecast(&points, thresholds, response.city.clone()).ok_or(WeatherError::EmptyForecast)
}
