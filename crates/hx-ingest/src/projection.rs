//! Projection of CSV data rows into canonical readings.
//!
//! Each mapped cell is parsed according to its field kind. A column claimed by
//! several fields feeds only its owner (see [`MappingSet::owner_of`]). Optional
//! fields that are unmapped, shadowed or unparsable receive defaults; rows
//! lacking any required value are skipped.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use hx_model::{CanonicalField, FieldKind, HeaderMapping, HeatExchangerReading, MappingSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::csv::CsvTable;
use crate::error::{IngestError, Result};

/// Maximum number of data rows accepted for projection.
pub const MAX_DATA_ROWS: usize = 10_000;

/// Fill values for optional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Timestamp used for rows without one.
    pub fallback_timestamp: String,
    /// Added to the cold inlet temperature when the cold outlet is absent.
    pub cold_outlet_offset: f64,
    pub pressure_drop: f64,
    pub fouling_resistance: f64,
    pub max_rows: usize,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            fallback_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            cold_outlet_offset: 10.0,
            pressure_drop: 150.0,
            fouling_resistance: 0.001,
            max_rows: MAX_DATA_ROWS,
        }
    }
}

impl ProjectionOptions {
    /// Default fill values with a fixed fallback timestamp.
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            fallback_timestamp: timestamp.into(),
            ..Self::default()
        }
    }
}

/// Readings produced from a table, plus the number of rows dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub readings: Vec<HeatExchangerReading>,
    pub skipped: usize,
}

/// Values parsed from one row, keyed by field.
#[derive(Default)]
struct RowValues {
    timestamp: Option<String>,
    numbers: BTreeMap<CanonicalField, f64>,
}

impl RowValues {
    fn number(&self, field: CanonicalField) -> Option<f64> {
        self.numbers.get(&field).copied()
    }
}

/// Parses a numeric cell; blank, non-numeric and non-finite cells are absent.
fn parse_number(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn extract(row: &[String], mappings: &[&HeaderMapping]) -> RowValues {
    let mut values = RowValues::default();
    for mapping in mappings {
        let Some(cell) = row.get(mapping.source_index) else {
            continue;
        };
        match mapping.canonical_field.kind() {
            FieldKind::Text => {
                let text = cell.trim();
                if !text.is_empty() {
                    values.timestamp = Some(text.to_string());
                }
            }
            FieldKind::Numeric => {
                if let Some(value) = parse_number(cell) {
                    values.numbers.insert(mapping.canonical_field, value);
                }
            }
        }
    }
    values
}

fn build_reading(values: RowValues, options: &ProjectionOptions) -> Option<HeatExchangerReading> {
    let inlet_temp_hot = values.number(CanonicalField::InletTempHot)?;
    let outlet_temp_hot = values.number(CanonicalField::OutletTempHot)?;
    let inlet_temp_cold = values.number(CanonicalField::InletTempCold)?;
    let flow_rate_hot = values.number(CanonicalField::FlowRateHot)?;

    Some(HeatExchangerReading {
        outlet_temp_cold: values
            .number(CanonicalField::OutletTempCold)
            .unwrap_or(inlet_temp_cold + options.cold_outlet_offset),
        flow_rate_cold: values
            .number(CanonicalField::FlowRateCold)
            .unwrap_or(flow_rate_hot),
        pressure_drop: values
            .number(CanonicalField::PressureDrop)
            .unwrap_or(options.pressure_drop),
        fouling_resistance: values
            .number(CanonicalField::FoulingResistance)
            .unwrap_or(options.fouling_resistance),
        timestamp: values
            .timestamp
            .unwrap_or_else(|| options.fallback_timestamp.clone()),
        inlet_temp_hot,
        outlet_temp_hot,
        inlet_temp_cold,
        flow_rate_hot,
    })
}

/// Projects every data row of `table` through `mappings`.
///
/// Fails with [`IngestError::TooManyRows`] above `options.max_rows` data rows
/// and with [`IngestError::NoValidRows`] when every row is skipped.
pub fn project_rows(
    table: &CsvTable,
    mappings: &MappingSet,
    options: &ProjectionOptions,
) -> Result<Projection> {
    if table.rows.len() > options.max_rows {
        return Err(IngestError::TooManyRows {
            rows: table.rows.len(),
            max: options.max_rows,
        });
    }

    let owned: Vec<&HeaderMapping> = mappings
        .iter()
        .filter(|m| {
            let owns = mappings.owns_source(m);
            if !owns {
                debug!(
                    field = %m.canonical_field,
                    header = %m.source_header,
                    "column owned by another field"
                );
            }
            owns
        })
        .collect();

    let mut readings = Vec::with_capacity(table.rows.len());
    let mut skipped = 0;
    for (idx, row) in table.rows.iter().enumerate() {
        match build_reading(extract(row, &owned), options) {
            Some(reading) => readings.push(reading),
            None => {
                debug!(row = idx + 1, "row missing a required value");
                skipped += 1;
            }
        }
    }

    if readings.is_empty() {
        return Err(IngestError::NoValidRows { skipped });
    }

    info!(rows = readings.len(), skipped, "rows projected");
    Ok(Projection { readings, skipped })
}
