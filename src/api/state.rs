use std::sync::Arc;

use crate::ml::Classifier;
use crate::services::{Metrics, PredictionService};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Model boundary; holds the process-wide read-only model
    pub predictor: PredictionService,

    /// Request counters
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        let metrics = Arc::new(Metrics::new());
        Self {
            predictor: PredictionService::new(model, Arc::clone(&metrics)),
            metrics,
        }
    }
}
