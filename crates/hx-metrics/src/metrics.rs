//! Summary metrics over a series of readings.
//!
//! Every metric is driven by the mean fouling resistance `Rf` (m²K/W):
//!
//! | metric | formula |
//! |--------|---------|
//! | effectiveness | `clamp(0.85 - 0.1 * Rf, 0, 1)` |
//! | fouling rate | `(Rf_last - Rf_first) / n`, 0 for a single reading |
//! | overall U | `1000 / (1 + 100 * Rf)` W/m²K |
//! | energy efficiency | `100 * effectiveness` |
//! | cleaning interval | `clamp(30 - 200 * Rf, 7, 90)` days |
//! | health score | mean of four 0-100 sub-scores |

use hx_model::HeatExchangerReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

const BASE_EFFECTIVENESS: f64 = 0.85;
const EFFECTIVENESS_PENALTY: f64 = 0.1;
const CLEAN_U: f64 = 1000.0;
const U_FOULING_FACTOR: f64 = 100.0;
const BASE_CLEANING_DAYS: f64 = 30.0;
const CLEANING_DAYS_FACTOR: f64 = 200.0;
const MIN_CLEANING_DAYS: f64 = 7.0;
const MAX_CLEANING_DAYS: f64 = 90.0;

/// Metrics reported for an empty series.
const DEFAULT_CLEANING_DAYS: u32 = 30;

/// Aggregate performance figures for a series of readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    /// Thermal effectiveness (0 to 1), 3 decimals.
    pub effectiveness: f64,
    /// Change in fouling resistance per reading, 6 decimals.
    pub fouling_rate: f64,
    /// Overall heat transfer coefficient (W/m²K), 2 decimals.
    pub overall_heat_transfer_coeff: f64,
    /// Energy efficiency percentage, 1 decimal.
    pub energy_efficiency: f64,
    /// Days until the next recommended cleaning (7 to 90).
    pub recommended_cleaning_days: u32,
    /// Overall health score (0 to 100), 1 decimal.
    pub system_health_score: f64,
}

impl Default for CalculatedMetrics {
    fn default() -> Self {
        Self {
            effectiveness: 0.0,
            fouling_rate: 0.0,
            overall_heat_transfer_coeff: 0.0,
            energy_efficiency: 0.0,
            recommended_cleaning_days: DEFAULT_CLEANING_DAYS,
            system_health_score: 0.0,
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub(crate) fn effectiveness_for(fouling: f64) -> f64 {
    (BASE_EFFECTIVENESS - fouling * EFFECTIVENESS_PENALTY).clamp(0.0, 1.0)
}

pub(crate) fn overall_u_for(fouling: f64) -> f64 {
    CLEAN_U / (1.0 + fouling * U_FOULING_FACTOR)
}

pub(crate) fn mean(values: impl ExactSizeIterator<Item = f64>) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    Some(values.sum::<f64>() / n as f64)
}

/// Computes [`CalculatedMetrics`] for `readings`.
///
/// An empty series yields zeros and a 30-day cleaning interval.
pub fn calculate_metrics(readings: &[HeatExchangerReading]) -> CalculatedMetrics {
    let Some(avg_fouling) = mean(readings.iter().map(|r| r.fouling_resistance)) else {
        return CalculatedMetrics::default();
    };

    let effectiveness = effectiveness_for(avg_fouling);
    let fouling_rate = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) if readings.len() > 1 => {
            (last.fouling_resistance - first.fouling_resistance) / readings.len() as f64
        }
        _ => 0.0,
    };
    let overall_u = overall_u_for(avg_fouling);
    let energy_efficiency = effectiveness * 100.0;
    let cleaning_days = (BASE_CLEANING_DAYS - avg_fouling * CLEANING_DAYS_FACTOR)
        .clamp(MIN_CLEANING_DAYS, MAX_CLEANING_DAYS);

    let sub_scores = [
        effectiveness * 100.0,
        (100.0 - fouling_rate.abs() * 10_000.0).max(0.0),
        (overall_u / 10.0).min(100.0),
        energy_efficiency,
    ];
    let health = sub_scores.iter().sum::<f64>() / sub_scores.len() as f64;

    debug!(
        readings = readings.len(),
        avg_fouling, effectiveness, health, "metrics calculated"
    );

    CalculatedMetrics {
        effectiveness: round_to(effectiveness, 3),
        fouling_rate: round_to(fouling_rate, 6),
        overall_heat_transfer_coeff: round_to(overall_u, 2),
        energy_efficiency: round_to(energy_efficiency, 1),
        // Clamped to 7..=90 above.
        recommended_cleaning_days: cleaning_days.round() as u32,
        system_health_score: round_to(health, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(fouling: f64) -> HeatExchangerReading {
        HeatExchangerReading {
            timestamp: "t".to_string(),
            inlet_temp_hot: 80.0,
            outlet_temp_hot: 60.0,
            inlet_temp_cold: 20.0,
            outlet_temp_cold: 30.0,
            flow_rate_hot: 1.2,
            flow_rate_cold: 1.2,
            pressure_drop: 150.0,
            fouling_resistance: fouling,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.8499, 3), 0.85);
        assert_eq!(round_to(909.090_909, 2), 909.09);
        assert_eq!(round_to(-0.000_000_4, 6), 0.0);
    }

    #[test]
    fn test_empty_series_defaults() {
        let metrics = calculate_metrics(&[]);
        assert_eq!(metrics, CalculatedMetrics::default());
        assert_eq!(metrics.recommended_cleaning_days, 30);
        assert_eq!(metrics.system_health_score, 0.0);
    }

    #[test]
    fn test_clean_exchanger() {
        let metrics = calculate_metrics(&[reading(0.001), reading(0.001)]);
        assert_eq!(metrics.effectiveness, 0.85);
        assert_eq!(metrics.fouling_rate, 0.0);
        assert_eq!(metrics.overall_heat_transfer_coeff, 909.09);
        assert_eq!(metrics.energy_efficiency, 85.0);
        assert_eq!(metrics.recommended_cleaning_days, 30);
        assert_eq!(metrics.system_health_score, 90.2);
    }

    #[test]
    fn test_rising_fouling() {
        let metrics = calculate_metrics(&[reading(0.001), reading(0.021)]);
        assert_eq!(metrics.effectiveness, 0.849);
        assert_eq!(metrics.fouling_rate, 0.01);
        assert_eq!(metrics.overall_heat_transfer_coeff, 476.19);
        assert_eq!(metrics.energy_efficiency, 84.9);
        assert_eq!(metrics.recommended_cleaning_days, 28);
        assert_eq!(metrics.system_health_score, 54.3);
    }

    #[test]
    fn test_cleaning_interval_is_clamped() {
        assert_eq!(calculate_metrics(&[reading(1.0)]).recommended_cleaning_days, 7);
        assert_eq!(calculate_metrics(&[reading(-1.0)]).recommended_cleaning_days, 90);
    }

    #[test]
    fn test_effectiveness_is_clamped() {
        assert_eq!(calculate_metrics(&[reading(20.0)]).effectiveness, 0.0);
        assert_eq!(calculate_metrics(&[reading(-5.0)]).effectiveness, 1.0);
    }
}
