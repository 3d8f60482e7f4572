use serde::{Deserialize, Serialize};

use crate::field::CanonicalField;

/// One projected sensor sample in the canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatExchangerReading {
    pub timestamp: String,
    pub inlet_temp_hot: f64,
    pub outlet_temp_hot: f64,
    pub inlet_temp_cold: f64,
    pub outlet_temp_cold: f64,
    pub flow_rate_hot: f64,
    pub flow_rate_cold: f64,
    pub pressure_drop: f64,
    pub fouling_resistance: f64,
}

impl HeatExchangerReading {
    /// Numeric value of a field; `None` for the timestamp.
    pub fn value(&self, field: CanonicalField) -> Option<f64> {
        match field {
            CanonicalField::Timestamp => None,
            CanonicalField::InletTempHot => Some(self.inlet_temp_hot),
            CanonicalField::OutletTempHot => Some(self.outlet_temp_hot),
            CanonicalField::InletTempCold => Some(self.inlet_temp_cold),
            CanonicalField::OutletTempCold => Some(self.outlet_temp_cold),
            CanonicalField::FlowRateHot => Some(self.flow_rate_hot),
            CanonicalField::FlowRateCold => Some(self.flow_rate_cold),
            CanonicalField::PressureDrop => Some(self.pressure_drop),
            CanonicalField::FoulingResistance => Some(self.fouling_resistance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let reading = HeatExchangerReading {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            inlet_temp_hot: 80.0,
            outlet_temp_hot: 60.0,
            inlet_temp_cold: 20.0,
            outlet_temp_cold: 30.0,
            flow_rate_hot: 1.5,
            flow_rate_cold: 1.5,
            pressure_drop: 150.0,
            fouling_resistance: 0.001,
        };
        let json = serde_json::to_value(&reading).unwrap();
        for field in CanonicalField::ALL {
            assert!(json.get(field.as_str()).is_some(), "missing {field}");
        }
        assert_eq!(reading.value(CanonicalField::PressureDrop), Some(150.0));
        assert_eq!(reading.value(CanonicalField::Timestamp), None);
    }
}
