//! Canonical heat exchanger fields.
//!
//! Every uploaded spreadsheet is translated into this fixed schema before any
//! downstream processing. The declaration order of [`CanonicalField`] is
//! significant: the mapper scans fields in this order and `Ord` follows it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the nine fields of the canonical reading schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Timestamp,
    InletTempHot,
    OutletTempHot,
    InletTempCold,
    OutletTempCold,
    FlowRateHot,
    FlowRateCold,
    PressureDrop,
    FoulingResistance,
}

/// Kind of value a canonical field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, kept verbatim.
    Text,
    /// Floating point sensor value.
    Numeric,
}

impl CanonicalField {
    /// All fields in declaration order.
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Timestamp,
        CanonicalField::InletTempHot,
        CanonicalField::OutletTempHot,
        CanonicalField::InletTempCold,
        CanonicalField::OutletTempCold,
        CanonicalField::FlowRateHot,
        CanonicalField::FlowRateCold,
        CanonicalField::PressureDrop,
        CanonicalField::FoulingResistance,
    ];

    /// Fields that must be mapped before rows can be projected.
    ///
    /// `timestamp` is intentionally absent: rows without one receive a
    /// fallback timestamp during projection.
    pub const REQUIRED: [CanonicalField; 4] = [
        CanonicalField::InletTempHot,
        CanonicalField::OutletTempHot,
        CanonicalField::InletTempCold,
        CanonicalField::FlowRateHot,
    ];

    /// Wire name of the field (camelCase).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::InletTempHot => "inletTempHot",
            Self::OutletTempHot => "outletTempHot",
            Self::InletTempCold => "inletTempCold",
            Self::OutletTempCold => "outletTempCold",
            Self::FlowRateHot => "flowRateHot",
            Self::FlowRateCold => "flowRateCold",
            Self::PressureDrop => "pressureDrop",
            Self::FoulingResistance => "foulingResistance",
        }
    }

    /// Human-readable label with unit.
    pub fn label(self) -> &'static str {
        match self {
            Self::Timestamp => "Timestamp",
            Self::InletTempHot => "Hot inlet temperature (°C)",
            Self::OutletTempHot => "Hot outlet temperature (°C)",
            Self::InletTempCold => "Cold inlet temperature (°C)",
            Self::OutletTempCold => "Cold outlet temperature (°C)",
            Self::FlowRateHot => "Hot mass flow rate (kg/s)",
            Self::FlowRateCold => "Cold mass flow rate (kg/s)",
            Self::PressureDrop => "Pressure drop (Pa)",
            Self::FoulingResistance => "Fouling resistance (m²K/W)",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Timestamp => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    /// Parses the wire name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownField(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_declaration() {
        let mut sorted = CanonicalField::ALL;
        sorted.sort();
        assert_eq!(sorted, CanonicalField::ALL);
        assert!(CanonicalField::Timestamp < CanonicalField::FoulingResistance);
    }

    #[test]
    fn parses_wire_names() {
        for field in CanonicalField::ALL {
            assert_eq!(field.as_str().parse::<CanonicalField>(), Ok(field));
        }
        assert_eq!(
            "FLOWRATEHOT".parse::<CanonicalField>(),
            Ok(CanonicalField::FlowRateHot)
        );
        assert_eq!(
            "flow".parse::<CanonicalField>(),
            Err(ModelError::UnknownField("flow".to_string()))
        );
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&CanonicalField::InletTempHot).unwrap();
        assert_eq!(json, "\"inletTempHot\"");
        let field: CanonicalField = serde_json::from_str("\"foulingResistance\"").unwrap();
        assert_eq!(field, CanonicalField::FoulingResistance);
    }

    #[test]
    fn timestamp_is_text_and_optional() {
        assert_eq!(CanonicalField::Timestamp.kind(), FieldKind::Text);
        assert!(!CanonicalField::Timestamp.is_required());
        assert!(CanonicalField::FlowRateHot.is_required());
        assert!(!CanonicalField::FlowRateCold.is_required());
    }
}
