//! ONNX estimator backend (pure Rust via `tract-onnx`).
//!
//! Consumes the already-encoded feature vector, so the artifact's
//! preprocessor still owns categorical handling.

use std::path::Path;

use tract_onnx::prelude::*;

use super::naive_bayes::argmax;
use super::Label;
use crate::error::{FaultError, Result};

#[derive(Clone)]
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
    input_dim: usize,
    output_dim: usize,
    classes: Vec<Label>,
    threshold: f64,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_dim", &self.input_dim)
            .field("output_dim", &self.output_dim)
            .field("classes", &self.classes)
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl OnnxClassifier {
    /// Load a graph and specialize it to a fixed `[1, input_dim]` f32 input.
    ///
    /// A single output is read as the positive-class score; otherwise the
    /// output length must equal the number of classes.
    pub fn load(path: &Path, input_dim: usize, classes: Vec<Label>, threshold: f64) -> Result<Self> {
        if input_dim == 0 {
            return Err(FaultError::InvalidModel("onnx input_dim must be > 0".to_string()));
        }
        if !path.exists() {
            return Err(FaultError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| FaultError::InvalidModel(format!("onnx load failed: {e}")))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_dim)),
            )
            .map_err(|e| FaultError::InvalidModel(format!("onnx input fact failed: {e}")))?
            .into_optimized()
            .map_err(|e| FaultError::InvalidModel(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| FaultError::InvalidModel(format!("onnx runnable failed: {e}")))?;

        // Infer output_dim by running a dummy forward pass.
        let dummy = tract_ndarray::Array2::<f32>::zeros((1, input_dim)).into_tvalue();
        let outputs = plan
            .run(tvec!(dummy))
            .map_err(|e| FaultError::InvalidModel(format!("onnx run failed: {e}")))?;
        let output_dim = outputs
            .first()
            .ok_or_else(|| FaultError::InvalidModel("onnx produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| FaultError::InvalidModel(format!("onnx output decode failed: {e}")))?
            .len();

        match output_dim {
            0 => {
                return Err(FaultError::InvalidModel(
                    "onnx output has zero elements".to_string(),
                ))
            }
            1 if classes.len() != 2 => {
                return Err(FaultError::InvalidModel(format!(
                    "single-score onnx output needs exactly 2 classes, got {}",
                    classes.len()
                )))
            }
            1 => {}
            n if n != classes.len() => {
                return Err(FaultError::InvalidModel(format!(
                    "onnx output_dim {n} != number of classes {}",
                    classes.len()
                )))
            }
            _ => {}
        }

        Ok(Self {
            plan,
            input_dim,
            output_dim,
            classes,
            threshold,
        })
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn scores(&self, x: &[f64]) -> Result<Vec<f32>> {
        if x.len() != self.input_dim {
            return Err(FaultError::ShapeMismatch(format!(
                "onnx input dim mismatch: got {}, expected {}",
                x.len(),
                self.input_dim
            )));
        }

        let input: Vec<f32> = x.iter().map(|v| *v as f32).collect();
        let tensor = tract_ndarray::Array2::<f32>::from_shape_vec((1, self.input_dim), input)
            .map_err(|e| FaultError::Inference(format!("onnx input reshape failed: {e}")))?
            .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| FaultError::Inference(format!("onnx run failed: {e}")))?;
        let out0 = outputs
            .first()
            .ok_or_else(|| FaultError::Inference("onnx produced no outputs".to_string()))?;
        let arr = out0
            .to_array_view::<f32>()
            .map_err(|e| FaultError::Inference(format!("onnx output decode failed: {e}")))?;

        Ok(arr.iter().copied().collect())
    }

    pub fn predict_encoded(&self, x: &[f64]) -> Result<&Label> {
        let scores = self.scores(x)?;
        if scores.len() != self.output_dim {
            return Err(FaultError::ShapeMismatch(format!(
                "onnx output dim changed: got {}, expected {}",
                scores.len(),
                self.output_dim
            )));
        }
        let idx = if self.output_dim == 1 {
            usize::from(f64::from(scores[0]) >= self.threshold)
        } else {
            let wide: Vec<f64> = scores.iter().map(|v| f64::from(*v)).collect();
            argmax(&wide)
                .ok_or_else(|| FaultError::Inference("onnx scores are not numbers".to_string()))?
        };
        Ok(&self.classes[idx])
    }
}
