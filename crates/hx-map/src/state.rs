//! Mapping state management for the interactive upload workflow.
//!
//! The engine produces a first guess; users then reassign or clear columns
//! before the rows are projected.

use hx_model::{CanonicalField, HeaderMapping, MappingSet, MappingValidation};
use serde::Serialize;
use tracing::debug;

use crate::engine::{ColumnMapper, validate_mappings};
use crate::error::{MappingError, Result};

/// Header row plus the current (possibly hand-edited) mapping.
#[derive(Debug, Clone)]
pub struct MappingState {
    headers: Vec<String>,
    mappings: MappingSet,
}

impl MappingState {
    /// Runs the mapper over `headers` and starts from its suggestions.
    pub fn new(headers: Vec<String>, mapper: &ColumnMapper) -> Self {
        let mappings = mapper.auto_map(&headers);
        Self { headers, mappings }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mappings(&self) -> &MappingSet {
        &self.mappings
    }

    /// Reassigns a column by name.
    ///
    /// Any mapping that currently uses the column is dropped. With
    /// `Some(field)`, any mapping currently targeting `field` is dropped too and
    /// the column is recorded with confidence 1.0. Duplicate header names
    /// resolve to the first occurrence.
    pub fn assign(&mut self, column: &str, field: Option<CanonicalField>) -> Result<()> {
        let index = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| MappingError::ColumnNotFound(column.to_string()))?;
        self.assign_index(index, field)
    }

    /// Reassigns the column at `index`. See [`Self::assign`].
    pub fn assign_index(&mut self, index: usize, field: Option<CanonicalField>) -> Result<()> {
        let Some(header) = self.headers.get(index) else {
            return Err(MappingError::ColumnNotFound(format!("#{index}")));
        };
        let header = header.clone();
        let removed = self.mappings.remove_source(index);
        match field {
            Some(field) => {
                self.mappings.remove_field(field);
                self.mappings.insert(HeaderMapping {
                    source_header: header.clone(),
                    source_index: index,
                    canonical_field: field,
                    confidence: 1.0,
                });
                self.mappings.sort_by_field();
                debug!(column = %header, field = %field, removed, "manual mapping");
            }
            None => {
                debug!(column = %header, removed, "mapping cleared");
            }
        }
        Ok(())
    }

    /// Headers not used by any mapping, in input order.
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.mappings.uses_source(*idx))
            .map(|(_, header)| header.as_str())
            .collect()
    }

    /// Canonical fields without a mapping, in declaration order.
    pub fn unmapped_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.mappings.contains(*field))
            .collect()
    }

    pub fn validation(&self) -> MappingValidation {
        validate_mappings(&self.mappings)
    }

    /// Get summary counts.
    pub fn summary(&self) -> MappingSummary {
        let required_mapped = CanonicalField::REQUIRED
            .iter()
            .filter(|field| self.mappings.contains(**field))
            .count();
        MappingSummary {
            total_fields: CanonicalField::ALL.len(),
            mapped: self.mappings.len(),
            required_total: CanonicalField::REQUIRED.len(),
            required_mapped,
            unmapped_headers: self.unmapped_headers().len(),
        }
    }
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Total number of canonical fields.
    pub total_fields: usize,
    /// Number of mapped fields.
    pub mapped: usize,
    /// Total required fields.
    pub required_total: usize,
    /// Required fields that are mapped.
    pub required_mapped: usize,
    /// Headers not used by any mapping.
    pub unmapped_headers: usize,
}
