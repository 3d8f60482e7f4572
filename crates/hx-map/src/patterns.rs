//! Alias dictionary for canonical fields.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hx_model::CanonicalField;
use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};

const TIMESTAMP: &[&str] = &[
    "timestamp", "time", "date", "t", "datetime", "Time", "DateTime",
];
const INLET_TEMP_HOT: &[&str] = &[
    "inletTempHot",
    "T_hot_in",
    "hot_inlet_temp",
    "inlet_temp_hot",
    "Th_in",
    "Th_inlet",
    "hot_in",
    "T_h_in",
    "temp_hot_in",
    "hot_inlet",
    "inlet_hot",
];
const OUTLET_TEMP_HOT: &[&str] = &[
    "outletTempHot",
    "T_hot_out",
    "hot_outlet_temp",
    "outlet_temp_hot",
    "Th_out",
    "Th_outlet",
    "hot_out",
    "T_h_out",
    "temp_hot_out",
    "hot_outlet",
    "outlet_hot",
];
const INLET_TEMP_COLD: &[&str] = &[
    "inletTempCold",
    "T_cold_in",
    "cold_inlet_temp",
    "inlet_temp_cold",
    "Tc_in",
    "Tc_inlet",
    "cold_in",
    "T_c_in",
    "temp_cold_in",
    "cold_inlet",
    "inlet_cold",
];
const OUTLET_TEMP_COLD: &[&str] = &[
    "outletTempCold",
    "T_cold_out",
    "cold_outlet_temp",
    "outlet_temp_cold",
    "Tc_out",
    "Tc_outlet",
    "cold_out",
    "T_c_out",
    "temp_cold_out",
    "cold_outlet",
    "outlet_cold",
];
const FLOW_RATE_HOT: &[&str] = &[
    "flowRateHot",
    "flow_hot",
    "hot_flow_rate",
    "mh",
    "m_hot",
    "flow_rate_hot",
    "mass_flow_hot",
    "mass_flow_h",
    "flowrate_hot",
    "hot_mass_flow",
];
const FLOW_RATE_COLD: &[&str] = &[
    "flowRateCold",
    "flow_cold",
    "cold_flow_rate",
    "mc",
    "m_cold",
    "flow_rate_cold",
    "mass_flow_cold",
    "mass_flow_c",
    "flowrate_cold",
    "cold_mass_flow",
];
const PRESSURE_DROP: &[&str] = &[
    "pressureDrop",
    "pressure_drop",
    "dp",
    "delta_p",
    "press_drop",
    "dP",
    "ΔP",
    "pressure",
    "deltap",
    "delta_pressure",
];
const FOULING_RESISTANCE: &[&str] = &[
    "foulingResistance",
    "Rf",
    "fouling_resistance",
    "R_f",
    "fouling",
    "resistance",
    "fouling_factor",
    "fouling_factor",
    "R_fouling",
    "fouling_res",
];

fn default_aliases(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::Timestamp => TIMESTAMP,
        CanonicalField::InletTempHot => INLET_TEMP_HOT,
        CanonicalField::OutletTempHot => OUTLET_TEMP_HOT,
        CanonicalField::InletTempCold => INLET_TEMP_COLD,
        CanonicalField::OutletTempCold => OUTLET_TEMP_COLD,
        CanonicalField::FlowRateHot => FLOW_RATE_HOT,
        CanonicalField::FlowRateCold => FLOW_RATE_COLD,
        CanonicalField::PressureDrop => PRESSURE_DROP,
        CanonicalField::FoulingResistance => FOULING_RESISTANCE,
    }
}

/// Ordered alias patterns per canonical field.
///
/// Iteration follows field declaration order, and aliases keep the order in
/// which they were registered. Fields absent from the table are never mapped.
///
/// A custom table is read from JSON of the form
/// `{ "inletTempHot": ["T1", "hot_in"], ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: BTreeMap<CanonicalField, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let aliases = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let values = default_aliases(field)
                    .iter()
                    .map(|alias| (*alias).to_string())
                    .collect();
                (field, values)
            })
            .collect();
        Self { aliases }
    }
}

impl AliasTable {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Adds aliases for a field, appending to any already registered.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, field: CanonicalField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .entry(field)
            .or_default()
            .extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Parses a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| MappingError::AliasRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Aliases registered for a field (empty if none).
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.aliases
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates fields with their aliases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &[String])> {
        self.aliases
            .iter()
            .map(|(field, aliases)| (*field, aliases.as_slice()))
    }

    pub fn field_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_every_field_in_order() {
        let table = AliasTable::default();
        let fields: Vec<CanonicalField> = table.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, CanonicalField::ALL.to_vec());
        assert_eq!(table.aliases(CanonicalField::Timestamp)[3], "t");
        assert!(
            table
                .aliases(CanonicalField::PressureDrop)
                .iter()
                .any(|alias| alias == "ΔP")
        );
    }

    #[test]
    fn parses_partial_json_table() {
        let table =
            AliasTable::from_json(r#"{"flowRateHot": ["q_hot"], "timestamp": ["ts"]}"#).unwrap();
        assert_eq!(table.field_count(), 2);
        assert_eq!(table.aliases(CanonicalField::FlowRateHot), ["q_hot"]);
        assert!(table.aliases(CanonicalField::InletTempHot).is_empty());
        let fields: Vec<CanonicalField> = table.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![CanonicalField::Timestamp, CanonicalField::FlowRateHot]
        );
    }

    #[test]
    fn rejects_unknown_field() {
        let err = AliasTable::from_json(r#"{"inletTemp": ["x"]}"#).unwrap_err();
        assert!(matches!(err, MappingError::AliasParse(_)));
    }

    #[test]
    fn builder_appends_aliases() {
        let table = AliasTable::empty()
            .with_aliases(CanonicalField::PressureDrop, ["dp"])
            .with_aliases(CanonicalField::PressureDrop, vec!["diff_press".to_string()]);
        assert_eq!(table.aliases(CanonicalField::PressureDrop), ["dp", "diff_press"]);
        assert_eq!(table.alias_count(), 2);
    }
}
