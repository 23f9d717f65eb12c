use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SensorConfig;

pub const HUMIDITY_RANGE_PCT: (f64, f64) = (30.0, 85.0);
pub const PH_RANGE: (f64, f64) = (5.5, 7.5);

/// One simulated soil-sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub humidity_pct: f64,
    pub ph: f64,
    pub phosphorus_present: bool,
    pub potassium_present: bool,
    pub pump_on: bool, // derived from humidity_pct
}

/// Time span shown by the dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ViewPeriod {
    #[value(name = "1h")]
    LastHour,
    #[value(name = "6h")]
    Last6Hours,
    #[value(name = "24h")]
    Last24Hours,
}

impl ViewPeriod {
    pub fn duration(self) -> Duration {
        match self {
            ViewPeriod::LastHour => Duration::hours(1),
            ViewPeriod::Last6Hours => Duration::hours(6),
            ViewPeriod::Last24Hours => Duration::hours(24),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewPeriod::LastHour => "last hour",
            ViewPeriod::Last6Hours => "last 6 hours",
            ViewPeriod::Last24Hours => "last 24 hours",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDataset {
    pub generated_at: DateTime<Utc>,
    pub readings: Vec<SensorReading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    pub count: usize,
    pub humidity_min: f64,
    pub humidity_max: f64,
    pub humidity_mean: f64,
    pub ph_min: f64,
    pub ph_max: f64,
    pub ph_mean: f64,
    pub pump_on_count: usize,
}

pub struct SensorGenerator {
    config: SensorConfig,
}

impl SensorGenerator {
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }

    /// Generates a fresh dataset ending at the current instant.
    pub fn generate(&self) -> SensorDataset {
        self.generate_with(&mut rand::thread_rng(), Utc::now())
    }

    /// Generates `reading_count` readings spaced `interval_minutes` apart,
    /// the last one stamped exactly at `now`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> SensorDataset {
        let count = self.config.reading_count;
        let step = Duration::minutes(self.config.interval_minutes);

        let readings: Vec<SensorReading> = (0..count)
            .map(|i| {
                let steps_back = (count - 1 - i) as i32;
                let timestamp = now - step * steps_back;
                self.sample(rng, timestamp)
            })
            .collect();

        debug!(
            "Generated {} sensor readings ({} pump activations)",
            readings.len(),
            readings.iter().filter(|r| r.pump_on).count()
        );

        SensorDataset {
            generated_at: now,
            readings,
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, timestamp: DateTime<Utc>) -> SensorReading {
        let humidity_pct = rng.gen_range(HUMIDITY_RANGE_PCT.0..=HUMIDITY_RANGE_PCT.1);
        let ph = rng.gen_range(PH_RANGE.0..=PH_RANGE.1);

        SensorReading {
            timestamp,
            humidity_pct,
            ph,
            phosphorus_present: rng.gen_bool(0.5),
            potassium_present: rng.gen_bool(0.5),
            pump_on: pump_should_run(humidity_pct, self.config.pump_humidity_threshold),
        }
    }
}

/// The simulated pump runs while soil humidity is strictly below the threshold.
pub fn pump_should_run(humidity_pct: f64, threshold_pct: f64) -> bool {
    humidity_pct < threshold_pct
}

impl SensorDataset {
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.last()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings no older than `period` relative to the latest reading.
    pub fn window(&self, period: ViewPeriod) -> &[SensorReading] {
        let Some(latest) = self.latest() else {
            return &[];
        };
        let cutoff = latest.timestamp - period.duration();
        let start = self.readings.partition_point(|r| r.timestamp < cutoff);
        &self.readings[start..]
    }

    pub fn summary(&self, period: ViewPeriod) -> Option<SensorSummary> {
        summarize(self.window(period))
    }
}

pub fn summarize(readings: &[SensorReading]) -> Option<SensorSummary> {
    if readings.is_empty() {
        return None;
    }

    let count = readings.len();
    let mut summary = SensorSummary {
        count,
        humidity_min: f64::INFINITY,
        humidity_max: f64::NEG_INFINITY,
        humidity_mean: 0.0,
        ph_min: f64::INFINITY,
        ph_max: f64::NEG_INFINITY,
        ph_mean: 0.0,
        pump_on_count: 0,
    };

    for r in readings {
        summary.humidity_min = summary.humidity_min.min(r.humidity_pct);
        summary.humidity_max = summary.humidity_max.max(r.humidity_pct);
        summary.humidity_mean += r.humidity_pct;
        summary.ph_min = summary.ph_min.min(r.ph);
        summary.ph_max = summary.ph_max.max(r.ph);
        summary.ph_mean += r.ph;
        if r.pump_on {
            summary.pump_on_count += 1;
        }
    }
    summary.humidity_mean /= count as f64;
    summary.ph_mean /= count as f64;

    Some(summary)
}
