use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter_vec, Encoder, Histogram, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static PROBES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "fscheck_probes_total",
        "Write probes run, by outcome",
        &["outcome"]
    )
    .expect("register probes_total")
});

pub static PROBE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "fscheck_probe_duration_seconds",
        "Duration of a full directory check in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]
    )
    .expect("register probe_duration")
});

pub fn record_probe(outcome: &str, elapsed_secs: f64) {
    PROBES_TOTAL.with_label_values(&[outcome]).inc();
    PROBE_DURATION.observe(elapsed_secs);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
