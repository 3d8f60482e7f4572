//! Header-to-field mapping value objects.

use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// A single header claimed by a canonical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderMapping {
    /// Header text exactly as it appeared in the input row.
    pub source_header: String,
    /// Zero-based position of the header in the input row.
    pub source_index: usize,
    /// Field the header was mapped to.
    pub canonical_field: CanonicalField,
    /// Confidence score (0.0 to 1.0). Manual assignments carry 1.0.
    pub confidence: f64,
}

/// Ordered collection of mappings with at most one entry per field.
///
/// Serialized as a plain array. Deserializing goes through [`MappingSet::insert`],
/// so a later entry for the same field replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HeaderMapping>", into = "Vec<HeaderMapping>")]
pub struct MappingSet {
    mappings: Vec<HeaderMapping>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping, replacing any existing mapping for the same field.
    pub fn insert(&mut self, mapping: HeaderMapping) {
        match self
            .mappings
            .iter_mut()
            .find(|m| m.canonical_field == mapping.canonical_field)
        {
            Some(existing) => *existing = mapping,
            None => self.mappings.push(mapping),
        }
    }

    /// Removes the mapping for a field, returning it if present.
    pub fn remove_field(&mut self, field: CanonicalField) -> Option<HeaderMapping> {
        let idx = self
            .mappings
            .iter()
            .position(|m| m.canonical_field == field)?;
        Some(self.mappings.remove(idx))
    }

    /// Removes every mapping that uses the header at `source_index`.
    ///
    /// Returns the number of mappings removed.
    pub fn remove_source(&mut self, source_index: usize) -> usize {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.source_index != source_index);
        before - self.mappings.len()
    }

    pub fn get(&self, field: CanonicalField) -> Option<&HeaderMapping> {
        self.mappings.iter().find(|m| m.canonical_field == field)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.get(field).is_some()
    }

    /// Returns true if any mapping uses the header at `source_index`.
    pub fn uses_source(&self, source_index: usize) -> bool {
        self.mappings.iter().any(|m| m.source_index == source_index)
    }

    /// The mapping that owns the header at `source_index` when several fields claim it.
    ///
    /// The highest confidence wins. Ties go to the earlier mapping in set order.
    pub fn owner_of(&self, source_index: usize) -> Option<&HeaderMapping> {
        self.mappings
            .iter()
            .filter(|m| m.source_index == source_index)
            .fold(None, |best: Option<&HeaderMapping>, m| match best {
                Some(b) if b.confidence >= m.confidence => Some(b),
                _ => Some(m),
            })
    }

    /// Returns true if `mapping` owns its header (see [`MappingSet::owner_of`]).
    pub fn owns_source(&self, mapping: &HeaderMapping) -> bool {
        self.owner_of(mapping.source_index)
            .is_some_and(|owner| owner.canonical_field == mapping.canonical_field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Sorts mappings by canonical field declaration order.
    pub fn sort_by_field(&mut self) {
        self.mappings.sort_by_key(|m| m.canonical_field);
    }
}

impl From<Vec<HeaderMapping>> for MappingSet {
    fn from(mappings: Vec<HeaderMapping>) -> Self {
        mappings.into_iter().collect()
    }
}

impl From<MappingSet> for Vec<HeaderMapping> {
    fn from(set: MappingSet) -> Self {
        set.mappings
    }
}

impl<'a> IntoIterator for &'a MappingSet {
    type Item = &'a HeaderMapping;
    type IntoIter = std::slice::Iter<'a, HeaderMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}

impl FromIterator<HeaderMapping> for MappingSet {
    fn from_iter<I: IntoIterator<Item = HeaderMapping>>(iter: I) -> Self {
        let mut set = Self::new();
        for mapping in iter {
            set.insert(mapping);
        }
        set
    }
}

/// Outcome of checking a mapping set for required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingValidation {
    pub is_valid: bool,
    /// Required fields absent from the set, in required-field order.
    pub missing: Vec<CanonicalField>,
}

impl MappingValidation {
    /// User-facing notice describing what is missing, if anything.
    pub fn message(&self) -> Option<String> {
        if self.is_valid {
            return None;
        }
        let names: Vec<&str> = self.missing.iter().map(|f| f.as_str()).collect();
        Some(format!(
            "Missing: {}. Check column names match expected patterns.",
            names.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(header: &str, index: usize, field: CanonicalField, confidence: f64) -> HeaderMapping {
        HeaderMapping {
            source_header: header.to_string(),
            source_index: index,
            canonical_field: field,
            confidence,
        }
    }

    #[test]
    fn insert_replaces_same_field() {
        let mut set = MappingSet::new();
        set.insert(mapping("Th_in", 0, CanonicalField::InletTempHot, 0.9));
        set.insert(mapping("hot_in", 1, CanonicalField::InletTempHot, 1.0));
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get(CanonicalField::InletTempHot).unwrap().source_header,
            "hot_in"
        );
    }

    #[test]
    fn remove_source_drops_all_claims() {
        let mut set = MappingSet::new();
        set.insert(mapping("t", 0, CanonicalField::Timestamp, 1.0));
        set.insert(mapping("t", 0, CanonicalField::InletTempHot, 0.9));
        set.insert(mapping("Tc_in", 1, CanonicalField::InletTempCold, 1.0));
        assert_eq!(set.remove_source(0), 2);
        assert!(!set.uses_source(0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn owner_of_prefers_highest_confidence() {
        let mut set = MappingSet::new();
        set.insert(mapping("Th_inlet", 0, CanonicalField::Timestamp, 0.9));
        set.insert(mapping("Th_inlet", 0, CanonicalField::InletTempHot, 1.0));
        set.insert(mapping("Th_out", 1, CanonicalField::OutletTempHot, 0.8));
        set.insert(mapping("Th_out", 1, CanonicalField::OutletTempCold, 0.8));

        let owner = set.owner_of(0).unwrap();
        assert_eq!(owner.canonical_field, CanonicalField::InletTempHot);
        assert!(!set.owns_source(set.get(CanonicalField::Timestamp).unwrap()));

        // Ties keep the earlier mapping.
        assert_eq!(
            set.owner_of(1).unwrap().canonical_field,
            CanonicalField::OutletTempHot
        );
        assert!(set.owner_of(7).is_none());
    }

    #[test]
    fn serializes_as_plain_array() {
        let set: MappingSet = vec![mapping("dP", 3, CanonicalField::PressureDrop, 1.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["canonical_field"], "pressureDrop");
    }

    #[test]
    fn validation_message() {
        let ok = MappingValidation {
            is_valid: true,
            missing: vec![],
        };
        assert_eq!(ok.message(), None);
        let missing = MappingValidation {
            is_valid: false,
            missing: vec![CanonicalField::InletTempHot, CanonicalField::FlowRateHot],
        };
        assert_eq!(
            missing.message().as_deref(),
            Some("Missing: inletTempHot, flowRateHot. Check column names match expected patterns.")
        );
    }
}
