//! Serializable views of mapping and analysis results.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use hx_ingest::Projection;
use hx_map::{ConfidenceLevel, ConfidenceThresholds, MappingState, MappingSummary};
use hx_metrics::{
    CalculatedMetrics, FoulingForecast, calculate_metrics, generate_insights, predict_fouling,
};
use hx_model::{CanonicalField, MappingValidation};
use serde::Serialize;

/// One row of the mapping report.
#[derive(Debug, Clone, Serialize)]
pub struct MappingRow {
    pub source_header: String,
    pub source_index: usize,
    pub canonical_field: CanonicalField,
    pub required: bool,
    pub confidence: f64,
    /// `high`, `medium` or `low`; absent for scores at or below 0.5.
    pub level: Option<&'static str>,
}

/// Everything `hxmap map` reports about a header row.
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    pub headers: Vec<String>,
    pub mappings: Vec<MappingRow>,
    pub unmapped_headers: Vec<String>,
    pub unmapped_fields: Vec<CanonicalField>,
    pub validation: MappingValidation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub summary: MappingSummary,
    /// Number of mappings per confidence level.
    pub levels: BTreeMap<ConfidenceLevel, usize>,
}

impl MappingReport {
    pub fn from_state(state: &MappingState) -> Self {
        let thresholds = ConfidenceThresholds::default();
        let mappings = state
            .mappings()
            .iter()
            .map(|m| MappingRow {
                source_header: m.source_header.clone(),
                source_index: m.source_index,
                canonical_field: m.canonical_field,
                required: m.canonical_field.is_required(),
                confidence: m.confidence,
                level: thresholds.categorize(m.confidence).map(|l| l.as_str()),
            })
            .collect();
        let validation = state.validation();
        Self {
            headers: state.headers().to_vec(),
            mappings,
            unmapped_headers: state
                .unmapped_headers()
                .into_iter()
                .map(str::to_string)
                .collect(),
            unmapped_fields: state.unmapped_fields(),
            message: validation.message(),
            validation,
            summary: state.summary(),
            levels: thresholds.count_by_level(state.mappings()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Everything `hxmap metrics` reports about a projected file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub readings: usize,
    pub skipped: usize,
    pub metrics: CalculatedMetrics,
    pub insights: Vec<String>,
    pub forecast: FoulingForecast,
}

impl AnalysisReport {
    pub fn from_projection(projection: &Projection) -> Result<Self> {
        let metrics = calculate_metrics(&projection.readings);
        let insights = generate_insights(&projection.readings, &metrics);
        let forecast = predict_fouling(&projection.readings).context("forecast fouling")?;
        Ok(Self {
            readings: projection.readings.len(),
            skipped: projection.skipped,
            metrics,
            insights,
            forecast,
        })
    }
}

/// Parses a `COLUMN=FIELD` correction. An empty field clears the column.
pub fn parse_assignment(raw: &str) -> Result<(String, Option<CanonicalField>)> {
    let Some((column, field)) = raw.rsplit_once('=') else {
        bail!("invalid assignment `{raw}`: expected COLUMN=FIELD");
    };
    let column = column.trim();
    if column.is_empty() {
        bail!("invalid assignment `{raw}`: column is empty");
    }
    let field = field.trim();
    if field.is_empty() {
        return Ok((column.to_string(), None));
    }
    let field = field
        .parse::<CanonicalField>()
        .with_context(|| format!("invalid assignment `{raw}`"))?;
    Ok((column.to_string(), Some(field)))
}

/// Applies `COLUMN=FIELD` corrections to a mapping state, in order.
pub fn apply_assignments(state: &mut MappingState, assignments: &[String]) -> Result<()> {
    for raw in assignments {
        let (column, field) = parse_assignment(raw)?;
        state
            .assign(&column, field)
            .with_context(|| format!("apply assignment `{raw}`"))?;
    }
    Ok(())
}
