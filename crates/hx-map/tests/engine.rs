use hx_map::{ColumnMapper, auto_map_columns, validate_mappings};
use hx_model::CanonicalField;

fn mapped(mappings: &hx_model::MappingSet, field: CanonicalField) -> Option<(&str, usize, f64)> {
    mappings
        .get(field)
        .map(|m| (m.source_header.as_str(), m.source_index, m.confidence))
}

#[test]
fn maps_required_fields_from_short_names() {
    let headers = ["Th_inlet", "Th_outlet", "Tc_inlet", "mass_flow_h"];
    let mappings = auto_map_columns(&headers);

    assert_eq!(
        mapped(&mappings, CanonicalField::InletTempHot),
        Some(("Th_inlet", 0, 1.0))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::OutletTempHot),
        Some(("Th_outlet", 1, 1.0))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::InletTempCold),
        Some(("Tc_inlet", 2, 1.0))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::FlowRateHot),
        Some(("mass_flow_h", 3, 1.0))
    );
    for mapping in &mappings {
        assert!(mapping.confidence > 0.5);
    }
    assert!(validate_mappings(&mappings).is_valid);
}

#[test]
fn unrelated_headers_map_nothing() {
    let mappings = auto_map_columns(&["foo", "bar", "baz"]);
    assert!(mappings.is_empty());

    let validation = validate_mappings(&mappings);
    assert!(!validation.is_valid);
    assert_eq!(
        validation.missing,
        vec![
            CanonicalField::InletTempHot,
            CanonicalField::OutletTempHot,
            CanonicalField::InletTempCold,
            CanonicalField::FlowRateHot,
        ]
    );
}

#[test]
fn empty_header_row_maps_nothing() {
    let headers: [&str; 0] = [];
    assert!(auto_map_columns(&headers).is_empty());
}

#[test]
fn duplicate_headers_resolve_to_first_occurrence() {
    let headers = ["inletTempHot", "inletTempHot"];
    let first = auto_map_columns(&headers);
    assert_eq!(
        mapped(&first, CanonicalField::InletTempHot),
        Some(("inletTempHot", 0, 1.0))
    );
    for _ in 0..10 {
        assert_eq!(auto_map_columns(&headers), first);
    }
}

#[test]
fn mapping_is_idempotent() {
    let mapper = ColumnMapper::default();
    let headers = vec![
        "Timestamp".to_string(),
        "Hot In (C)".to_string(),
        "Cold Flow (kg/s)".to_string(),
    ];
    assert_eq!(mapper.auto_map(&headers), mapper.auto_map(&headers));
}

#[test]
fn delta_p_maps_to_pressure_drop_after_stripping_delta() {
    let mappings = auto_map_columns(&["ΔP"]);
    assert_eq!(
        mapped(&mappings, CanonicalField::PressureDrop),
        Some(("ΔP", 0, 1.0))
    );

    // Normalization drops the delta, so a bare "P" is indistinguishable.
    let bare = auto_map_columns(&["P"]);
    assert_eq!(
        mapped(&bare, CanonicalField::PressureDrop),
        Some(("P", 0, 1.0))
    );

    // "p" is also a substring of aliases such as "timestamp".
    assert_eq!(
        mapped(&mappings, CanonicalField::Timestamp),
        Some(("ΔP", 0, 0.9))
    );
}

#[test]
fn one_header_can_be_claimed_by_several_fields() {
    let mappings = auto_map_columns(&["Th_inlet", "Th_outlet", "Tc_inlet", "mass_flow_h"]);
    // "t" is an alias of timestamp and a substring of "thinlet".
    assert_eq!(
        mapped(&mappings, CanonicalField::Timestamp),
        Some(("Th_inlet", 0, 0.9))
    );
    assert_eq!(
        mappings
            .get(CanonicalField::FlowRateCold)
            .map(|m| m.source_index),
        Some(3)
    );
}

#[test]
fn full_alias_row_maps_every_field_exactly() {
    let headers = [
        "Time",
        "T_hot_in",
        "T_hot_out",
        "T_cold_in",
        "T_cold_out",
        "flow_hot",
        "flow_cold",
        "dP",
        "Rf",
    ];
    let mappings = auto_map_columns(&headers);
    assert_eq!(mappings.len(), 9);
    for (idx, field) in CanonicalField::ALL.into_iter().enumerate() {
        assert_eq!(mapped(&mappings, field), Some((headers[idx], idx, 1.0)));
    }
    let fields: Vec<CanonicalField> = mappings.iter().map(|m| m.canonical_field).collect();
    assert_eq!(fields, CanonicalField::ALL.to_vec());
}

#[test]
fn descriptive_headers_map_by_containment() {
    let headers = [
        "Timestamp",
        "Hot In (C)",
        "Hot Out (C)",
        "Cold In (C)",
        "Cold Out (C)",
        "Hot Flow (kg/s)",
        "Cold Flow (kg/s)",
        "Pressure Drop (Pa)",
        "Fouling (m2K/W)",
    ];
    let mappings = auto_map_columns(&headers);
    assert_eq!(
        mapped(&mappings, CanonicalField::InletTempHot),
        Some(("Hot In (C)", 1, 0.9))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::FoulingResistance),
        Some(("Fouling (m2K/W)", 8, 0.9))
    );
    let flow = mappings.get(CanonicalField::FlowRateHot).unwrap();
    assert_eq!(flow.source_index, 5);
    assert!(flow.confidence > 0.5 && flow.confidence < 0.85);
    // The alias "ΔP" normalizes to "p", which "timestamp" contains; first header wins the tie.
    assert_eq!(
        mappings
            .get(CanonicalField::PressureDrop)
            .map(|m| m.source_index),
        Some(0)
    );
    assert!(validate_mappings(&mappings).is_valid);
}

#[test]
fn empty_header_matches_by_containment() {
    let mappings = auto_map_columns(&["hot_in", "Rf", ""]);
    assert_eq!(
        mapped(&mappings, CanonicalField::InletTempHot),
        Some(("hot_in", 0, 1.0))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::FoulingResistance),
        Some(("Rf", 1, 1.0))
    );
    assert_eq!(
        mapped(&mappings, CanonicalField::FlowRateHot),
        Some(("", 2, 0.9))
    );
}
