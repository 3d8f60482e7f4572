//! Data model for heat exchanger column mapping.

pub mod error;
pub mod field;
pub mod mapping;
pub mod reading;

pub use error::{ModelError, Result};
pub use field::{CanonicalField, FieldKind};
pub use mapping::{HeaderMapping, MappingSet, MappingValidation};
pub use reading::HeatExchangerReading;
