use serde::{Deserialize, Serialize};

use super::features::FeatureRow;

/// Sensor readings submitted for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Categorical feature
    pub equipment_name: String,
    /// Categorical feature
    pub location_name: String,
    pub temperature: f64,
    pub pressure: f64,
    pub vibration: f64,
    pub humidity: f64,
}

/// Binary fault indicator: 0.0 = not faulty, 1.0 = faulty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub faulty: f64,
}

/// Kind of JSON value a request field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Request schema in feature order. Kept in sync with [`FeatureRow`].
pub const REQUEST_SCHEMA: [(&str, FieldKind); 6] = [
    ("equipment_name", FieldKind::Text),
    ("location_name", FieldKind::Text),
    ("temperature", FieldKind::Number),
    ("pressure", FieldKind::Number),
    ("vibration", FieldKind::Number),
    ("humidity", FieldKind::Number),
];

impl From<PredictionRequest> for FeatureRow {
    fn from(req: PredictionRequest) -> Self {
        FeatureRow {
            equipment_name: req.equipment_name,
            location_name: req.location_name,
            temperature: req.temperature,
            pressure: req.pressure,
            vibration: req.vibration,
            humidity: req.humidity,
        }
    }
}
