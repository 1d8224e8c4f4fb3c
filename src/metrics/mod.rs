// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{gather_metrics, GEMINI_API_CALLS, GEMINI_API_DURATION, PREDICTIONS_TOTAL};

/// Helper to record the outcome of a `/predict/` request
pub fn record_prediction(outcome: &str) {
    PREDICTIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record Gemini API call metrics
pub fn record_gemini_call(model: &str, outcome: &str, duration_secs: f64) {
    GEMINI_API_CALLS.with_label_values(&[model, outcome]).inc();
    GEMINI_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}
