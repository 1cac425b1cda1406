pub mod metrics;
pub mod prediction;

pub use metrics::Metrics;
pub use prediction::{predict_row, PredictionService};
