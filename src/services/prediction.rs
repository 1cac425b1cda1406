//! Request-to-model boundary.
//!
//! Every failure between feature assembly and label coercion comes back as a
//! `FaultError`; nothing escapes as a panic or an untyped error.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{FeatureRow, PredictionRequest, PredictionResponse};
use crate::error::{FaultError, Result};
use crate::ml::Classifier;
use crate::services::Metrics;

#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Classifier>,
    metrics: Arc<Metrics>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn Classifier>, metrics: Arc<Metrics>) -> Self {
        Self { model, metrics }
    }

    /// Run one prediction on the blocking pool.
    pub async fn predict(&self, request: PredictionRequest) -> Result<PredictionResponse> {
        let row = FeatureRow::from(request);
        let model = Arc::clone(&self.model);

        let outcome = tokio::task::spawn_blocking(move || predict_row(model.as_ref(), &row))
            .await
            .map_err(|e| FaultError::Inference(format!("inference task failed: {e}")))
            .and_then(|r| r);

        match outcome {
            Ok(faulty) => {
                self.metrics.record_prediction(faulty);
                debug!(faulty, "prediction served");
                Ok(PredictionResponse { faulty })
            }
            Err(e) => {
                self.metrics.inc_prediction_failures();
                warn!(error = %e, "prediction failed");
                Err(e)
            }
        }
    }
}

/// Single-row inference: first label of the model's output, as a float.
pub fn predict_row(model: &dyn Classifier, row: &FeatureRow) -> Result<f64> {
    let labels = model.predict(std::slice::from_ref(row))?;
    let label = labels
        .first()
        .ok_or_else(|| FaultError::Inference("model returned no predictions".to_string()))?;
    label.to_f64()
}
