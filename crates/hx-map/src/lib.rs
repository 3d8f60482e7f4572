//! Fuzzy mapping of spreadsheet headers to the canonical heat exchanger schema.
//!
//! # Example
//!
//! ```
//! use hx_map::{auto_map_columns, validate_mappings};
//!
//! let mappings = auto_map_columns(&["Th_inlet", "Th_outlet", "Tc_inlet", "mass_flow_h"]);
//! assert!(validate_mappings(&mappings).is_valid);
//! ```

#![deny(unsafe_code)]

mod engine;
mod error;
mod patterns;
mod score;
mod state;

pub use engine::{
    ACCEPTANCE_THRESHOLD, ColumnMapper, ConfidenceLevel, ConfidenceThresholds, auto_map_columns,
    validate_mappings,
};
pub use error::{MappingError, Result};
pub use patterns::AliasTable;
pub use score::{MatchRule, SimilarityScore, expand_abbreviations, normalize, score, similarity};
pub use state::{MappingState, MappingSummary};
