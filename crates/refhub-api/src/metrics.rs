//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "refhub_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "refhub_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "refhub_http_requests_in_flight";

    // Marketplace metrics
    pub const AUTH_EVENTS_TOTAL: &str = "refhub_auth_events_total";
    pub const APPLICATIONS_SUBMITTED_TOTAL: &str = "refhub_applications_submitted_total";
    pub const APPLICATION_STATUS_CHANGES_TOTAL: &str = "refhub_application_status_changes_total";
    pub const RESUME_UPLOADS_TOTAL: &str = "refhub_resume_uploads_total";
    pub const RESUME_UPLOAD_BYTES: &str = "refhub_resume_upload_bytes";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "refhub_rate_limit_hits_total";
}

/// Record an HTTP request. `route` is the matched route template.
pub fn record_http_request(method: &str, route: String, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", route),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a signup or login attempt.
pub fn record_auth_event(event: &'static str, outcome: &'static str) {
    counter!(names::AUTH_EVENTS_TOTAL, "event" => event, "outcome" => outcome).increment(1);
}

/// Record a submitted application.
pub fn record_application_submitted() {
    counter!(names::APPLICATIONS_SUBMITTED_TOTAL).increment(1);
}

/// Record an application status change.
pub fn record_status_change(status: &'static str) {
    counter!(names::APPLICATION_STATUS_CHANGES_TOTAL, "status" => status).increment(1);
}

/// Record a stored resume.
pub fn record_resume_upload(size_bytes: usize) {
    counter!(names::RESUME_UPLOADS_TOTAL).increment(1);
    histogram!(names::RESUME_UPLOAD_BYTES).record(size_bytes as f64);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(route: String) {
    counter!(names::RATE_LIMIT_HITS_TOTAL, "endpoint" => route).increment(1);
}

/// Route template for metric labels, e.g. `/api/jobs/:id`.
///
/// Raw paths are never used so clients cannot mint new series.
pub fn route_label<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let route = route_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, route, status, duration);

    response
}
