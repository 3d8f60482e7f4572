//! Linear fouling forecast and cleaning schedule.

use std::fmt;

use hx_model::HeatExchangerReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MetricsError, Result};
use crate::metrics::{effectiveness_for, overall_u_for};

/// Number of daily steps in a forecast.
pub const FORECAST_DAYS: usize = 30;

/// Fouling resistance (m²K/W) above which cleaning is due.
pub const CLEANING_THRESHOLD: f64 = 0.05;

/// Daily trend assumed when only one reading is available.
const SINGLE_READING_TREND: f64 = 0.001;

const BASE_CONFIDENCE: f64 = 0.8;
const TREND_CONFIDENCE_PENALTY: f64 = 10.0;
const MIN_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;

/// When the forecast first crosses [`CLEANING_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "days", rename_all = "camelCase")]
pub enum CleaningSchedule {
    /// The first forecast day is already over the threshold.
    Immediate,
    /// The threshold is crossed after this many days.
    InDays(usize),
    /// The threshold is not crossed within the forecast horizon.
    NotWithinHorizon,
}

impl fmt::Display for CleaningSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("Immediate cleaning recommended"),
            Self::InDays(days) => write!(f, "Cleaning recommended in {days} days"),
            Self::NotWithinHorizon => {
                write!(f, "No cleaning needed within {FORECAST_DAYS} days")
            }
        }
    }
}

/// Daily fouling projection with derived performance figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoulingForecast {
    /// Projected fouling resistance for each of the next [`FORECAST_DAYS`] days.
    pub future_fouling_resistance: Vec<f64>,
    /// Overall heat transfer coefficient for each projected day.
    pub predicted_u: Vec<f64>,
    /// Effectiveness for each projected day.
    pub predicted_effectiveness: Vec<f64>,
    pub cleaning_schedule: CleaningSchedule,
    /// Forecast confidence (0.6 to 0.95); steeper trends are less certain.
    pub confidence_score: f64,
}

/// Projects fouling resistance forward from the latest reading.
///
/// The trend is the fouling rate over the series, or 0.001 per day for a
/// single reading. Projected values never go below zero.
pub fn predict_fouling(readings: &[HeatExchangerReading]) -> Result<FoulingForecast> {
    let (Some(first), Some(last)) = (readings.first(), readings.last()) else {
        return Err(MetricsError::NoData("fouling forecast"));
    };

    let current = last.fouling_resistance;
    let trend = if readings.len() > 1 {
        (last.fouling_resistance - first.fouling_resistance) / readings.len() as f64
    } else {
        SINGLE_READING_TREND
    };

    let future: Vec<f64> = (1..=FORECAST_DAYS)
        .map(|day| (current + trend * day as f64).max(0.0))
        .collect();
    let predicted_u = future.iter().map(|&f| overall_u_for(f)).collect();
    let predicted_effectiveness = future.iter().map(|&f| effectiveness_for(f)).collect();

    let cleaning_schedule = match future.iter().position(|&f| f > CLEANING_THRESHOLD) {
        Some(0) => CleaningSchedule::Immediate,
        Some(days) => CleaningSchedule::InDays(days),
        None => CleaningSchedule::NotWithinHorizon,
    };
    let confidence_score = (BASE_CONFIDENCE - trend.abs() * TREND_CONFIDENCE_PENALTY)
        .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    debug!(
        current,
        trend,
        schedule = %cleaning_schedule,
        "fouling forecast"
    );

    Ok(FoulingForecast {
        future_fouling_resistance: future,
        predicted_u,
        predicted_effectiveness,
        cleaning_schedule,
        confidence_score,
    })
}
