use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Hosted backend metrics
    pub static ref BACKEND_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "backend_operations_total",
        "Total number of hosted backend operations",
        &["operation", "table", "status"]
    )
    .unwrap();

    pub static ref BACKEND_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "backend_operation_duration_seconds",
        "Hosted backend operation duration in seconds",
        &["operation", "table"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .unwrap();

    // Content generation
    pub static ref CONTENT_GENERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "content_generations_total",
        "Total number of content generation requests",
        &["kind", "origin"]
    )
    .unwrap();

    pub static ref CONTENT_GENERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "content_generation_duration_seconds",
        "Completion API call duration in seconds",
        &["kind"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .unwrap();

    // Business Metrics
    pub static ref QUIZ_SESSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_sessions_total",
        "Total number of quiz sessions by lifecycle event",
        &["status"]
    )
    .unwrap();

    pub static ref QUIZ_SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        "quiz_sessions_active",
        "Number of quiz sessions still in progress"
    )
    .unwrap();

    pub static ref QUIZ_ANSWERS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "quiz_answers_total",
        "Total number of answers selected",
        &["correct"]
    )
    .unwrap();

    pub static ref AUTH_EVENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "auth_events_total",
        "Total number of auth gate transitions",
        &["event"]
    )
    .unwrap();

    pub static ref SSE_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "sse_connections_active",
        "Number of active SSE connections"
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: track a hosted backend call with metrics
pub async fn track_backend_operation<F, T, E>(
    operation: &str,
    table: &str,
    future: F,
) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = std::time::Instant::now();
    let result = future.await;
    let duration = start.elapsed().as_secs_f64();

    let status = if result.is_ok() { "success" } else { "error" };

    BACKEND_OPERATIONS_TOTAL
        .with_label_values(&[operation, table, status])
        .inc();

    BACKEND_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation, table])
        .observe(duration);

    result
}

pub fn record_generation(kind: &str, origin: &str) {
    CONTENT_GENERATIONS_TOTAL
        .with_label_values(&[kind, origin])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .get();
    }

    #[test]
    fn test_render_metrics() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        record_generation("lesson", "demo");

        let output = render_metrics().unwrap();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("content_generations_total"));
    }

    #[tokio::test]
    async fn backend_operations_are_counted_by_outcome() {
        let ok: Result<u8, String> =
            track_backend_operation("select", "metrics_test", async { Ok(1) }).await;
        assert!(ok.is_ok());
        let err: Result<u8, String> =
            track_backend_operation("select", "metrics_test", async { Err("boom".to_string()) })
                .await;
        assert!(err.is_err());

        assert_eq!(
            BACKEND_OPERATIONS_TOTAL
                .with_label_values(&["select", "metrics_test", "error"])
                .get(),
            1
        );
    }
}
