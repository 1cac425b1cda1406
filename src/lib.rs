pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod services;

pub use config::AppConfig;
pub use domain::{FeatureRow, PredictionRequest, PredictionResponse};
pub use error::{FaultError, Result};
pub use ml::{Classifier, FaultModel, Label, ModelInfo};
pub use services::{Metrics, PredictionService};
