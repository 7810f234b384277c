//! # HTTP Request Tracing Middleware
//!
//! Wraps each request in an `http_request` span, logs its outcome and records
//! the request counter and latency histogram.

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use std::time::Instant;
use tracing::Instrument;

/// Axum middleware that traces and measures every HTTP request
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let span = crate::request_span!(method, path);
    let response = next.run(request).instrument(span.clone()).await;

    let status_code = response.status().as_u16();
    let elapsed = start.elapsed();
    let elapsed_ms = elapsed.as_millis() as u64;

    span.in_scope(|| {
        if status_code >= 500 {
            tracing::error!(status = status_code, elapsed_ms, "request failed");
        } else if status_code >= 400 {
            tracing::warn!(status = status_code, elapsed_ms, "request rejected");
        } else {
            tracing::info!(status = status_code, elapsed_ms, "request completed");
        }
    });

    let path_label = normalize_path_for_metrics(&path);

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path_label.clone(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path_label
    )
    .record(elapsed.as_secs_f64());

    response
}

/// Replace product ids with a placeholder to keep label cardinality bounded
fn normalize_path_for_metrics(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();

    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let after_collection = i > 0 && segments[i - 1] == "products";
            if after_collection && !segment.is_empty() {
                ":id"
            } else {
                *segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
