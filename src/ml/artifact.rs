//! Model artifact loading.
//!
//! The artifact is a JSON document holding the fitted preprocessor and
//! estimator parameters produced by the training pipeline. It is read once
//! at startup; any problem here is fatal for the service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::encoder::ColumnEncoder;
use super::naive_bayes::GaussianNb;
#[cfg(feature = "onnx")]
use super::onnx::OnnxClassifier;
use super::{Classifier, Label, ModelInfo};
use crate::domain::{FeatureRow, FEATURE_ORDER};
use crate::error::{FaultError, Result};

/// Artifact format version understood by this build.
pub const ARTIFACT_VERSION: u32 = 1;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "gaussian_nb_pipeline.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_version")]
    pub version: u32,
    pub preprocessor: ColumnEncoder,
    pub estimator: EstimatorSpec,
    /// Optional free-form metadata (training run, dataset, etc).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

fn default_version() -> u32 {
    ARTIFACT_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EstimatorSpec {
    GaussianNb(GaussianNb),
    Onnx(OnnxSpec),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnnxSpec {
    /// Path to the `.onnx` graph, relative to the artifact file.
    pub path: String,
    pub classes: Vec<Label>,
    /// Cut-off applied when the graph emits a single positive-class score.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone)]
enum Estimator {
    GaussianNb(GaussianNb),
    #[cfg(feature = "onnx")]
    Onnx(OnnxClassifier),
}

impl Estimator {
    fn kind(&self) -> &'static str {
        match self {
            Estimator::GaussianNb(_) => "gaussian_nb",
            #[cfg(feature = "onnx")]
            Estimator::Onnx(_) => "onnx",
        }
    }

    fn classes(&self) -> &[Label] {
        match self {
            Estimator::GaussianNb(nb) => &nb.classes,
            #[cfg(feature = "onnx")]
            Estimator::Onnx(m) => m.classes(),
        }
    }

    fn predict_encoded(&self, x: &[f64]) -> Result<&Label> {
        match self {
            Estimator::GaussianNb(nb) => nb.predict_encoded(x),
            #[cfg(feature = "onnx")]
            Estimator::Onnx(m) => m.predict_encoded(x),
        }
    }
}

/// Loaded fault classifier: fitted preprocessor plus estimator.
#[derive(Debug, Clone)]
pub struct FaultModel {
    encoder: ColumnEncoder,
    estimator: Estimator,
    source: PathBuf,
    metadata: serde_json::Value,
}

impl FaultModel {
    /// Load and validate the artifact at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FaultError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
            FaultError::InvalidModel(format!("failed to parse {}: {e}", path.display()))
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut model = Self::from_artifact(artifact, base_dir)?;
        model.source = path.to_path_buf();
        Ok(model)
    }

    /// Build from an in-memory artifact. Relative estimator paths resolve against `base_dir`.
    pub fn from_artifact(artifact: ModelArtifact, base_dir: &Path) -> Result<Self> {
        if artifact.version != ARTIFACT_VERSION {
            return Err(FaultError::InvalidModel(format!(
                "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
                artifact.version
            )));
        }

        let encoder = artifact.preprocessor;
        encoder.validate().map_err(FaultError::InvalidModel)?;
        let width = encoder.width();

        let estimator = match artifact.estimator {
            EstimatorSpec::GaussianNb(nb) => {
                nb.validate(width).map_err(FaultError::InvalidModel)?;
                Estimator::GaussianNb(nb)
            }
            EstimatorSpec::Onnx(spec) => build_onnx(spec, base_dir, width)?,
        };

        Ok(Self {
            encoder,
            estimator,
            source: PathBuf::new(),
            metadata: artifact.metadata,
        })
    }

    pub fn encoded_width(&self) -> usize {
        self.encoder.width()
    }
}

#[cfg(feature = "onnx")]
fn build_onnx(spec: OnnxSpec, base_dir: &Path, width: usize) -> Result<Estimator> {
    let candidate = Path::new(&spec.path);
    let path = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    };
    let model = OnnxClassifier::load(&path, width, spec.classes, spec.threshold)?;
    Ok(Estimator::Onnx(model))
}

#[cfg(not(feature = "onnx"))]
fn build_onnx(spec: OnnxSpec, _base_dir: &Path, _width: usize) -> Result<Estimator> {
    Err(FaultError::InvalidModel(format!(
        "estimator '{}' is an ONNX graph; rebuild with the `onnx` feature to load it",
        spec.path
    )))
}

impl Classifier for FaultModel {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<Label>> {
        rows.iter()
            .map(|row| {
                let x = self.encoder.encode(row)?;
                self.estimator.predict_encoded(&x).cloned()
            })
            .collect()
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            estimator: self.estimator.kind().to_string(),
            source: self.source.display().to_string(),
            features: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
            encoded_width: self.encoder.width(),
            classes: self.estimator.classes().to_vec(),
            metadata: self.metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artifact_json() -> serde_json::Value {
        json!({
            "version": 1,
            "preprocessor": {
                "categorical": [
                    {"feature": "equipment_name", "categories": ["Pump-1", "Turbine"]},
                    {"feature": "location_name", "categories": ["PlantA"], "handle_unknown": "ignore"}
                ],
                "numeric": {
                    "features": ["temperature", "pressure", "vibration", "humidity"]
                }
            },
            "estimator": {
                "type": "gaussian_nb",
                "classes": [0, 1],
                "class_prior": [0.5, 0.5],
                "theta": [[0.5, 0.5, 1.0, 70.0, 100.0, 0.0, 40.0],
                          [0.5, 0.5, 1.0, 90.0, 110.0, 1.0, 70.0]],
                "var":   [[0.25, 0.25, 0.01, 25.0, 4.0, 0.01, 25.0],
                          [0.25, 0.25, 0.01, 25.0, 4.0, 0.01, 25.0]]
            }
        })
    }

    fn row(temperature: f64, vibration: f64) -> FeatureRow {
        FeatureRow {
            equipment_name: "Turbine".to_string(),
            location_name: "PlantZ".to_string(),
            temperature,
            pressure: 100.0,
            vibration,
            humidity: 45.0,
        }
    }

    #[test]
    fn builds_and_predicts_from_artifact() {
        let artifact: ModelArtifact = serde_json::from_value(artifact_json()).unwrap();
        let model = FaultModel::from_artifact(artifact, Path::new(".")).unwrap();
        assert_eq!(model.encoded_width(), 7);

        let labels = model.predict(&[row(70.0, 0.0), row(92.0, 0.9)]).unwrap();
        assert_eq!(labels, vec![Label::Number(0.0), Label::Number(1.0)]);

        let info = model.info();
        assert_eq!(info.estimator, "gaussian_nb");
        assert_eq!(info.features, FEATURE_ORDER);
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut raw = artifact_json();
        raw["version"] = json!(2);
        let artifact: ModelArtifact = serde_json::from_value(raw).unwrap();
        let err = FaultModel::from_artifact(artifact, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("unsupported artifact version"));
    }

    #[test]
    fn rejects_estimator_width_mismatch() {
        let mut raw = artifact_json();
        raw["preprocessor"]["categorical"][1]["categories"] = json!(["PlantA", "PlantB"]);
        let artifact: ModelArtifact = serde_json::from_value(raw).unwrap();
        let err = FaultModel::from_artifact(artifact, Path::new(".")).unwrap_err();
        assert!(matches!(err, FaultError::InvalidModel(_)));
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_estimator_requires_feature() {
        let mut raw = artifact_json();
        raw["estimator"] = json!({"type": "onnx", "path": "fault.onnx", "classes": [0, 1]});
        let artifact: ModelArtifact = serde_json::from_value(raw).unwrap();
        let err = FaultModel::from_artifact(artifact, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("`onnx` feature"));
    }
}
