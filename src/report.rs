//! Plain-text rendering of sensor and weather data for the terminal.

use std::fmt::Write;

use crate::irrigation::IrrigationDecision;
use crate::sensors::{SensorReading, SensorSummary, ViewPeriod};
use crate::weather::{ForecastPoint, WeatherAdvisory};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

fn pump_label(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Key indicators of the latest reading.
pub fn render_kpis(reading: &SensorReading) -> String {
    format!(
        "Soil humidity: {:.1}% | pH: {:.2} | Phosphorus (P): {} | Potassium (K): {} | Pump: {}",
        reading.humidity_pct,
        reading.ph,
        presence(reading.phosphorus_present),
        presence(reading.potassium_present),
        pump_label(reading.pump_on),
    )
}

pub fn render_sensor_table(readings: &[SensorReading]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<17} {:>9} {:>5} {:>8} {:>8} {:>5}",
        "Timestamp", "Humidity", "pH", "P", "K", "Pump"
    );
    for r in readings {
        let _ = writeln!(
            out,
            "{:<17} {:>8.1}% {:>5.2} {:>8} {:>8} {:>5}",
            r.timestamp.format(TIME_FORMAT),
            r.humidity_pct,
            r.ph,
            presence(r.phosphorus_present),
            presence(r.potassium_present),
            pump_label(r.pump_on),
        );
    }
    out
}

pub fn render_summary(summary: &SensorSummary, period: ViewPeriod) -> String {
    format!(
        "{} readings ({}): humidity {:.1}-{:.1}% (mean {:.1}%), pH {:.2}-{:.2} (mean {:.2}), pump on in {} readings",
        summary.count,
        period.label(),
        summary.humidity_min,
        summary.humidity_max,
        summary.humidity_mean,
        summary.ph_min,
        summary.ph_max,
        summary.ph_mean,
        summary.pump_on_count,
    )
}

pub fn render_current_conditions(point: &ForecastPoint) -> String {
    format!(
        "Temperature: {}°C (feels like {}°C) | Air humidity: {}% | Condition: {}",
        point.temperature,
        point.feels_like,
        point.humidity_pct,
        capitalize(&point.description),
    )
}

/// One entry per inspected point, plus an alert line for points that trigger
/// the rain condition, then the forecast location.
pub fn advisory_log(advisory: &WeatherAdvisory) -> Vec<String> {
    let mut lines = Vec::with_capacity(advisory.inspected.len() * 2 + 1);

    for assessment in &advisory.inspected {
        let p = &assessment.point;
        lines.push(format!(
            "{}, Condition: {}, Rain: {:.0}%, Vol: {}mm",
            p.timestamp.format(TIME_FORMAT),
            capitalize(&p.description),
            p.precipitation_probability_pct,
            p.rain_volume_mm,
        ));
        if assessment.rain_expected {
            lines.push("  -> ALERT: significant rain forecast in this period!".to_string());
        }
    }

    if let Some(city) = &advisory.city {
        lines.push(format!(
            "Forecast location: {}, {}",
            city.name.as_deref().unwrap_or("N/A"),
            city.country.as_deref().unwrap_or("N/A"),
        ));
    }

    lines
}

pub fn render_decision(decision: IrrigationDecision) -> String {
    let marker = if decision.irrigate() { "[IRRIGATE]" } else { "[HOLD]" };
    format!("{} {}", marker, decision.message())
}
