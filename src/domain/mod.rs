pub mod features;
pub mod request;

pub use features::{FeatureRow, CATEGORICAL_FEATURES, FEATURE_ORDER, NUMERIC_FEATURES};
pub use request::{FieldKind, PredictionRequest, PredictionResponse, REQUEST_SCHEMA};
