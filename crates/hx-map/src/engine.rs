//! Mapping engine implementation.

use std::collections::BTreeMap;

use hx_model::{CanonicalField, HeaderMapping, MappingSet, MappingValidation};
use serde::Serialize;
use tracing::{debug, trace};

use crate::patterns::AliasTable;
use crate::score::similarity;

/// Scores at or below this value are never turned into mappings.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Confidence level categories for mapping quality assessment.
///
/// - `High`: exact or expanded-exact alias matches
/// - `Medium`: substring matches that are usually right
/// - `Low`: edit-distance matches requiring manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Thresholds for categorizing mapping confidence.
///
/// Categorization is for display only and never changes which mappings the
/// engine produces.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.95).
    pub high: f64,
    /// Minimum confidence for medium-quality matches (default: 0.85).
    pub medium: f64,
    /// Confidence must exceed this to be categorized at all (default: 0.5).
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.95,
            medium: 0.85,
            low: ACCEPTANCE_THRESHOLD,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score into a confidence level.
    ///
    /// Returns `None` if the score does not exceed the low threshold.
    #[must_use]
    pub fn categorize(&self, confidence: f64) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence > self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }

    /// Returns the count of mappings at each confidence level.
    #[must_use]
    pub fn count_by_level(&self, mappings: &MappingSet) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for mapping in mappings {
            if let Some(level) = self.categorize(mapping.confidence) {
                *counts.entry(level).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Maps raw spreadsheet headers onto the canonical schema.
///
/// The mapper owns an immutable [`AliasTable`]. For every canonical field, in
/// declaration order, it scans all headers against all aliases of that field
/// and keeps the single best-scoring header. A candidate only replaces the
/// current best on a strictly higher score, so on ties the earliest header
/// (and earliest alias) wins.
///
/// Fields are scanned independently: one header may be claimed by several
/// fields if it is the best candidate for each of them.
///
/// # Example
///
/// ```
/// use hx_map::ColumnMapper;
/// use hx_model::CanonicalField;
///
/// let mapper = ColumnMapper::default();
/// let mappings = mapper.auto_map(&["Th_in", "Th_out", "Tc_in", "mh"]);
/// assert_eq!(
///     mappings.get(CanonicalField::FlowRateHot).map(|m| m.source_header.as_str()),
///     Some("mh")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    aliases: AliasTable,
}

struct Candidate {
    index: usize,
    confidence: f64,
}

impl ColumnMapper {
    /// Creates a mapper over a custom alias table.
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Suggests a mapping for a header row.
    ///
    /// Never fails: an empty or unrecognizable row yields an empty set.
    pub fn auto_map<S: AsRef<str>>(&self, headers: &[S]) -> MappingSet {
        let mut mappings = MappingSet::new();
        for (field, patterns) in self.aliases.iter() {
            let Some(best) = best_candidate(headers, patterns) else {
                trace!(field = %field, "no header above threshold");
                continue;
            };
            let header = headers[best.index].as_ref();
            debug!(
                field = %field,
                header = %header,
                index = best.index,
                confidence = best.confidence,
                "mapped header"
            );
            mappings.insert(HeaderMapping {
                source_header: header.to_string(),
                source_index: best.index,
                canonical_field: field,
                confidence: best.confidence,
            });
        }
        debug!(
            header_count = headers.len(),
            mapped = mappings.len(),
            "auto-mapping complete"
        );
        mappings
    }
}

fn best_candidate<S: AsRef<str>>(headers: &[S], patterns: &[String]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (index, header) in headers.iter().enumerate() {
        for pattern in patterns {
            let confidence = similarity(header.as_ref(), pattern);
            if confidence <= ACCEPTANCE_THRESHOLD {
                continue;
            }
            if best.as_ref().is_none_or(|b| confidence > b.confidence) {
                best = Some(Candidate { index, confidence });
            }
        }
    }
    best
}

/// Maps a header row using the default alias table.
pub fn auto_map_columns<S: AsRef<str>>(headers: &[S]) -> MappingSet {
    ColumnMapper::default().auto_map(headers)
}

/// Checks that every required field has a mapping.
///
/// `missing` lists absent fields in [`CanonicalField::REQUIRED`] order.
pub fn validate_mappings(mappings: &MappingSet) -> MappingValidation {
    let missing: Vec<CanonicalField> = CanonicalField::REQUIRED
        .into_iter()
        .filter(|field| !mappings.contains(*field))
        .collect();
    MappingValidation {
        is_valid: missing.is_empty(),
        missing,
    }
}
