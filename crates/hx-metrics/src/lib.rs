//! Heat exchanger performance analysis.
//!
//! Derives summary metrics, plain-language insights and a 30-day fouling
//! forecast from projected [`HeatExchangerReading`](hx_model::HeatExchangerReading)
//! values.

mod error;
mod forecast;
mod insights;
mod metrics;

pub use error::{MetricsError, Result};
pub use forecast::{
    CLEANING_THRESHOLD, CleaningSchedule, FORECAST_DAYS, FoulingForecast, predict_fouling,
};
pub use insights::generate_insights;
pub use metrics::{CalculatedMetrics, calculate_metrics};
