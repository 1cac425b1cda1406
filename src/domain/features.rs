//! Feature row handed to the classifier.
//!
//! The model was fitted on columns in exactly this order:
//! equipment_name, location_name, temperature, pressure, vibration, humidity.
//! Nothing in the request schema describes that order, so it lives here.

use serde::{Deserialize, Serialize};

/// Training column order. Artifacts declaring a different order are rejected at load.
pub const FEATURE_ORDER: [&str; 6] = [
    "equipment_name",
    "location_name",
    "temperature",
    "pressure",
    "vibration",
    "humidity",
];

/// Names of the categorical columns, in order.
pub const CATEGORICAL_FEATURES: [&str; 2] = ["equipment_name", "location_name"];

/// Names of the numeric columns, in order.
pub const NUMERIC_FEATURES: [&str; 4] = ["temperature", "pressure", "vibration", "humidity"];

/// One ordered, mixed-type feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub equipment_name: String,
    pub location_name: String,
    pub temperature: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub humidity: f64,
}

impl FeatureRow {
    /// Categorical values in [`CATEGORICAL_FEATURES`] order.
    pub fn categorical(&self) -> [&str; 2] {
        [self.equipment_name.as_str(), self.location_name.as_str()]
    }

    /// Numeric values in [`NUMERIC_FEATURES`] order.
    pub fn numeric(&self) -> [f64; 4] {
        [self.temperature, self.pressure, self.vibration, self.humidity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_training_order() {
        let row = FeatureRow {
            equipment_name: "Pump-1".to_string(),
            location_name: "PlantA".to_string(),
            temperature: 75.0,
            pressure: 101.3,
            vibration: 0.02,
            humidity: 40.0,
        };

        assert_eq!(row.categorical(), ["Pump-1", "PlantA"]);
        assert_eq!(row.numeric(), [75.0, 101.3, 0.02, 40.0]);

        let joined: Vec<&str> = CATEGORICAL_FEATURES
            .iter()
            .chain(NUMERIC_FEATURES.iter())
            .copied()
            .collect();
        assert_eq!(joined, FEATURE_ORDER);
    }
}
