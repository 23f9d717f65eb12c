use serde::{Deserialize, Serialize};
use tracing::info;

use crate::weather::WeatherOutcome;

/// What to do when no forecast could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NoDataPolicy {
    Withhold,
    Proceed,
}

impl std::str::FromStr for NoDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "withhold" => Ok(NoDataPolicy::Withhold),
            "proceed" => Ok(NoDataPolicy::Proceed),
            other => Err(format!("expected 'withhold' or 'proceed', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WithholdReason {
    RainExpected,
    NoForecastData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum IrrigationDecision {
    Irrigate,
    Withhold(WithholdReason),
}

impl IrrigationDecision {
    pub fn irrigate(self) -> bool {
        matches!(self, IrrigationDecision::Irrigate)
    }

    pub fn message(self) -> &'static str {
        match self {
            IrrigationDecision::Irrigate => {
                "Irrigate: no significant rain forecast, proceed based on soil sensors"
            }
            IrrigationDecision::Withhold(WithholdReason::RainExpected) => {
                "Do not irrigate: significant rain forecast in the next hours"
            }
            IrrigationDecision::Withhold(WithholdReason::NoForecastData) => {
                "Do not irrigate: forecast unavailable"
            }
        }
    }
}

/// Climate-only irrigation rule. Soil readings do not participate.
pub fn should_irrigate(rain_expected: bool) -> bool {
    !rain_expected
}

pub fn decide(outcome: &WeatherOutcome, policy: NoDataPolicy) -> IrrigationDecision {
    let decision = match outcome {
        WeatherOutcome::Available(advisory) => {
            if should_irrigate(advisory.rain_expected) {
                IrrigationDecision::Irrigate
            } else {
                IrrigationDecision::Withhold(WithholdReason::RainExpected)
            }
        }
        WeatherOutcome::NoData { .. } => match policy {
            NoDataPolicy::Withhold => IrrigationDecision::Withhold(WithholdReason::NoForecastData),
            NoDataPolicy::Proceed => IrrigationDecision::Irrigate,
        },
    };

    info!("Irrigation decision: {}", decision.message());
    decision
}
