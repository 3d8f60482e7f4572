//! Plain-language observations derived from metrics and readings.

use hx_model::HeatExchangerReading;

use crate::metrics::{CalculatedMetrics, mean};

const EXCELLENT_HEALTH: f64 = 80.0;
const ACCEPTABLE_HEALTH: f64 = 60.0;
const FOULING_RATE_ALERT: f64 = 0.001;
const LOW_ENERGY_EFFICIENCY: f64 = 70.0;
const FREQUENT_CLEANING_DAYS: u32 = 14;
const HIGH_INLET_TEMP: f64 = 85.0;

/// Builds the insight list for `readings` summarized by `metrics`.
///
/// The first entry always describes overall health. Further entries flag a
/// fast fouling rate, low energy efficiency, a short cleaning interval and
/// high mean hot-side inlet temperature, in that order.
pub fn generate_insights(
    readings: &[HeatExchangerReading],
    metrics: &CalculatedMetrics,
) -> Vec<String> {
    let mut insights = Vec::new();

    let health = if metrics.system_health_score > EXCELLENT_HEALTH {
        "System is operating in excellent condition."
    } else if metrics.system_health_score > ACCEPTABLE_HEALTH {
        "System performance is acceptable but could be improved."
    } else {
        "System requires immediate attention: performance is below optimal."
    };
    insights.push(health.to_string());

    if metrics.fouling_rate > FOULING_RATE_ALERT {
        insights.push(format!(
            "Fouling is accumulating at {:.2} μm²K/W per day.",
            metrics.fouling_rate * 1_000_000.0
        ));
    }

    if metrics.energy_efficiency < LOW_ENERGY_EFFICIENCY {
        insights.push(
            "Energy efficiency is low: consider cleaning or operational adjustments.".to_string(),
        );
    }

    if metrics.recommended_cleaning_days < FREQUENT_CLEANING_DAYS {
        insights.push("Frequent cleaning may be required due to high fouling rate.".to_string());
    }

    let avg_inlet = mean(readings.iter().map(|r| r.inlet_temp_hot));
    if avg_inlet.is_some_and(|t| t > HIGH_INLET_TEMP) {
        insights.push(
            "High inlet temperatures may be accelerating fouling formation.".to_string(),
        );
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::calculate_metrics;

    fn reading(inlet_temp_hot: f64, fouling: f64) -> HeatExchangerReading {
        HeatExchangerReading {
            timestamp: "t".to_string(),
            inlet_temp_hot,
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
    fn test_healthy_system_has_one_insight() {
        let readings = [reading(80.0, 0.001), reading(80.0, 0.001)];
        let insights = generate_insights(&readings, &calculate_metrics(&readings));
        assert_eq!(insights, vec!["System is operating in excellent condition."]);
    }

    #[test]
    fn test_fouling_and_temperature_alerts() {
        let readings = [reading(90.0, 0.001), reading(90.0, 0.021)];
        let insights = generate_insights(&readings, &calculate_metrics(&readings));
        assert_eq!(
            insights,
            vec![
                "System requires immediate attention: performance is below optimal.",
                "Fouling is accumulating at 10000.00 μm²K/W per day.",
                "High inlet temperatures may be accelerating fouling formation.",
            ]
        );
    }

    #[test]
    fn test_threshold_messages_from_metrics_alone() {
        let metrics = CalculatedMetrics {
            effectiveness: 0.6,
            fouling_rate: 0.0,
            overall_heat_transfer_coeff: 700.0,
            energy_efficiency: 60.0,
            recommended_cleaning_days: 7,
            system_health_score: 65.0,
        };
        let insights = generate_insights(&[], &metrics);
        assert_eq!(
            insights,
            vec![
                "System performance is acceptable but could be improved.",
                "Energy efficiency is low: consider cleaning or operational adjustments.",
                "Frequent cleaning may be required due to high fouling rate.",
            ]
        );
    }
}
