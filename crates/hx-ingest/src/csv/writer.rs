//! CSV export of projected readings.

use std::io::Write;

use csv::WriterBuilder;
use hx_model::{CanonicalField, HeatExchangerReading};
use tracing::debug;

use crate::error::{IngestError, Result};

fn write_error(err: impl std::fmt::Display) -> IngestError {
    IngestError::CsvWrite {
        message: err.to_string(),
    }
}

/// Writes `readings` as CSV with one column per canonical field, in field order.
///
/// The header row uses the wire names (`timestamp`, `inletTempHot`, ...).
pub fn write_readings_csv<W: Write>(readings: &[HeatExchangerReading], writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer
        .write_record(CanonicalField::ALL.map(CanonicalField::as_str))
        .map_err(write_error)?;

    for reading in readings {
        let record = CanonicalField::ALL.iter().map(|&field| match reading.value(field) {
            Some(value) => value.to_string(),
            None => reading.timestamp.clone(),
        });
        csv_writer.write_record(record).map_err(write_error)?;
    }

    csv_writer.flush().map_err(write_error)?;
    debug!(rows = readings.len(), "readings written as CSV");
    Ok(())
}
