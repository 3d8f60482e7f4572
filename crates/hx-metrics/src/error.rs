use thiserror::Error;

/// Errors raised by analyses that need at least one reading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("no readings available for {0}")]
    NoData(&'static str),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
