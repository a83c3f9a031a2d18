//! Access logging middleware.
//!
//! Built on [`TraceLayer`]: one `http_request` span per request and a single
//! completion event with status and latency. The span declares an empty
//! `request_id` field that inner layers fill in, so the completion event
//! carries the correlation id of the same request.

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, MakeSpan, OnResponse, TraceLayer};
use tracing::{info, info_span, Span};

/// Trace layer with the access-log span and completion event.
///
/// Request-start and failure hooks are disabled so each request produces
/// exactly one log line.
pub type AccessLogLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    AccessLogSpan,
    (),
    AccessLogCompletion,
    DefaultOnBodyChunk,
    DefaultOnEos,
    (),
>;

#[must_use]
pub fn access_log_layer() -> AccessLogLayer {
    TraceLayer::new_for_http()
        .make_span_with(AccessLogSpan)
        .on_request(())
        .on_response(AccessLogCompletion)
        .on_failure(())
}

/// Opens the `http_request` span with method and path.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogSpan;

impl<B> MakeSpan<B> for AccessLogSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = tracing::field::Empty,
        )
    }
}

/// Emits `request completed` with status and latency inside the request span.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogCompletion;

impl<B> OnResponse<B> for AccessLogCompletion {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        info!(
            status = response.status().as_u16(),
            latency_ms,
            "request completed"
        );
    }
}
