use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for observability
pub struct Metrics {
    /// When the process started serving
    started_at: DateTime<Utc>,
    /// Successful predictions
    pub predictions: AtomicU64,
    /// Successful predictions with a non-zero fault indicator
    pub predictions_faulty: AtomicU64,
    /// Predictions that reached the model and failed
    pub prediction_failures: AtomicU64,
    /// Requests rejected by schema validation
    pub validation_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            predictions: AtomicU64::new(0),
            predictions_faulty: AtomicU64::new(0),
            prediction_failures: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&self, faulty: f64) {
        self.predictions.fetch_add(1, Ordering::Relaxed);
        if faulty != 0.0 {
            self.predictions_faulty.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_prediction_failures(&self) {
        self.prediction_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }

    /// Prometheus text exposition
    pub fn render(&self) -> String {
        format!(
            r#"# HELP fault_predictor_up Service is serving
# TYPE fault_predictor_up gauge
fault_predictor_up 1

# HELP fault_predictor_uptime_seconds Uptime in seconds
# TYPE fault_predictor_uptime_seconds gauge
fault_predictor_uptime_seconds {}

# HELP fault_predictor_predictions_total Successful predictions
# TYPE fault_predictor_predictions_total counter
fault_predictor_predictions_total {}

# HELP fault_predictor_predictions_faulty_total Predictions flagged as faulty
# TYPE fault_predictor_predictions_faulty_total counter
fault_predictor_predictions_faulty_total {}

# HELP fault_predictor_prediction_failures_total Predictions that failed during inference
# TYPE fault_predictor_prediction_failures_total counter
fault_predictor_prediction_failures_total {}

# HELP fault_predictor_validation_failures_total Requests rejected by schema validation
# TYPE fault_predictor_validation_failures_total counter
fault_predictor_validation_failures_total {}
"#,
            self.uptime_seconds(),
            self.predictions.load(Ordering::Relaxed),
            self.predictions_faulty.load(Ordering::Relaxed),
            self.prediction_failures.load(Ordering::Relaxed),
            self.validation_failures.load(Ordering::Relaxed),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_faulty_predictions_separately() {
        let m = Metrics::new();
        m.record_prediction(0.0);
        m.record_prediction(1.0);
        m.record_prediction(1.0);
        m.inc_prediction_failures();

        assert_eq!(m.predictions.load(Ordering::Relaxed), 3);
        assert_eq!(m.predictions_faulty.load(Ordering::Relaxed), 2);
        assert_eq!(m.prediction_failures.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn renders_prometheus_text() {
        let m = Metrics::new();
        m.inc_validation_failures();
        let text = m.render();
        assert!(text.contains("fault_predictor_up 1"));
        assert!(text.contains("fault_predictor_validation_failures_total 1"));
        assert!(text.contains("fault_predictor_predictions_total 0"));
        assert!(text.contains("# TYPE fault_predictor_uptime_seconds gauge"));
    }
}
