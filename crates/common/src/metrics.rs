use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static STORAGE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "camp_admin_storage_failures_total",
        "Storage operations that failed and were absorbed",
        &["op"]
    )
    .expect("register storage_failures_total")
});

pub static NOTIFICATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "camp_admin_notifications_total",
        "Notification send attempts by outcome",
        &["outcome"]
    )
    .expect("register notifications_total")
});

pub fn record_storage_failure(op: &str) {
    STORAGE_FAILURES_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_notification(outcome: &str) {
    NOTIFICATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    // Touch the statics so they show up even before the first event.
    Lazy::force(&STORAGE_FAILURES_TOTAL);
    Lazy::force(&NOTIFICATIONS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
