//! Model loading and inference.
//!
//! Everything here is synchronous and CPU-only; the HTTP layer moves calls
//! onto the blocking pool.

pub mod artifact;
pub mod encoder;
pub mod label;
pub mod naive_bayes;
#[cfg(feature = "onnx")]
pub mod onnx;

use serde::Serialize;

use crate::domain::FeatureRow;
use crate::error::Result;

pub use artifact::{FaultModel, ModelArtifact, DEFAULT_MODEL_PATH};
pub use encoder::{ColumnEncoder, UnknownPolicy};
pub use label::Label;
pub use naive_bayes::GaussianNb;
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;

/// A fitted classifier: ordered feature rows in, one label per row out.
///
/// Implementations are shared read-only across concurrent requests.
pub trait Classifier: Send + Sync {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Label>>;

    fn info(&self) -> ModelInfo;
}

/// Summary of a loaded model, for logs and the `check` command.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub estimator: String,
    pub source: String,
    pub features: Vec<String>,
    pub encoded_width: usize,
    pub classes: Vec<Label>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}
