use crate::error::MetricsInitError;
use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_LENGTH;
use axum::middleware::Next;
use axum::response::Response;
use error_stack::{Report, ResultExt};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use tokio::time::Instant;

const COURSES_RETRIEVED_METRIC_NAME: &str = "courses_retrieved";
const REQUEST_DURATION_METRIC_NAME: &str = "http_requests_duration_seconds";
const REQUEST_SIZE_METRIC_NAME: &str = "http_request_size";
const REQUESTS_TOTAL_METRIC_NAME: &str = "http_requests_total";

const COURSES_CREATED_METRIC_NAME: &str = "num_courses_created";
const COURSES_UPDATED_METRIC_NAME: &str = "num_courses_updated";
const COURSES_DELETED_METRIC_NAME: &str = "num_courses_deleted";

pub fn setup_recorder() -> Result<PrometheusHandle, Report<MetricsInitError>> {
    const EXPONENTIAL_SECONDS: &[f64] = &[0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    const REQ_RES_BUCKETS: &[f64] = &[128.0, 256.0, 512.0, 1024.0, 2048.0, 4096.0, 8192.0, 16384.0];

    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_METRIC_NAME.to_string()),
            EXPONENTIAL_SECONDS,
        )
        .change_context(MetricsInitError)?
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_SIZE_METRIC_NAME.to_string()),
            REQ_RES_BUCKETS,
        )
        .change_context(MetricsInitError)?
        .install_recorder()
        .change_context(MetricsInitError)
}

/// Records count, latency and size of every course request. The metrics endpoint itself is skipped.
pub async fn track_http(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |path| path.as_str().to_owned());

    if route.ends_with("/metrics") {
        return next.run(req).await;
    }

    if let Some(size) = content_length(&req) {
        metrics::histogram!(REQUEST_SIZE_METRIC_NAME).record(size);
    }

    let method = req.method().to_string();
    let start = Instant::now();
    let response = next.run(req).await;

    record_response(method, route, response.status(), start.elapsed());
    response
}

fn content_length(req: &Request) -> Option<f64> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse::<u32>()
        .ok()
        .map(f64::from)
}

fn record_response(method: String, route: String, status: StatusCode, latency: Duration) {
    let labels = [
        ("method", method),
        ("path", route),
        ("status", status.as_u16().to_string()),
    ];

    metrics::counter!(REQUESTS_TOTAL_METRIC_NAME, &labels).increment(1);
    metrics::histogram!(REQUEST_DURATION_METRIC_NAME, &labels).record(latency.as_secs_f64());
}

#[inline]
pub fn increment_courses_retrieved() {
    increment_courses_retrieved_by(1);
}

#[inline]
pub fn increment_courses_retrieved_by(amt: usize) {
    metrics::counter!(COURSES_RETRIEVED_METRIC_NAME)
        .increment(u64::try_from(amt).unwrap_or(u64::MAX));
}

#[inline]
pub fn increment_courses_created() {
    metrics::counter!(COURSES_CREATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_courses_updated() {
    metrics::counter!(COURSES_UPDATED_METRIC_NAME).increment(1);
}

#[inline]
pub fn increment_courses_deleted() {
    metrics::counter!(COURSES_DELETED_METRIC_NAME).increment(1);
}
