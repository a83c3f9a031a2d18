//! Shared fixtures for network tests: log capture, multipart bodies, stubs.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request;
use dms_metadata_core::{FileHandle, Metadata, MetadataError, RequestContext};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::handlers::AppState;
use super::shutdown::ShutdownController;
use crate::traits::{MetadataProvider, StorageUrlResolver};

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// Every captured event as a flat map of its own fields plus the fields of
/// all enclosing spans.
pub(crate) type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

struct CaptureLayer {
    events: Captured,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(fields);
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(fields) = span.extensions_mut().get_mut::<Fields>() {
                values.record(fields);
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope.from_root() {
                if let Some(span_fields) = span.extensions().get::<Fields>() {
                    fields.0.extend(span_fields.0.clone());
                }
            }
        }
        event.record(&mut fields);
        self.events.lock().unwrap().push(fields.0);
    }
}

/// Subscriber that records every event; install with `set_default`.
pub(crate) fn capture_subscriber() -> (impl Subscriber + Send + Sync, Captured) {
    let events = Captured::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer {
        events: Arc::clone(&events),
    });
    (subscriber, events)
}

/// Captured events whose message equals `message`.
pub(crate) fn events_with_message(
    events: &Captured,
    message: &str,
) -> Vec<HashMap<String, String>> {
    events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| event.get("message").is_some_and(|m| m == message))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Multipart requests
// ---------------------------------------------------------------------------

pub(crate) const BOUNDARY: &str = "dms-test-boundary";

/// One file part under `field`, without the closing delimiter.
pub(crate) fn file_part(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(content);
    part.extend_from_slice(b"\r\n");
    part
}

/// One plain form value under `name`, without the closing delimiter.
pub(crate) fn value_part(name: &str, value: &[u8]) -> Vec<u8> {
    let mut part =
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
            .into_bytes();
    part.extend_from_slice(value);
    part.extend_from_slice(b"\r\n");
    part
}

/// Joins `parts` into a complete multipart body.
pub(crate) fn multipart_of(parts: &[Vec<u8>]) -> Vec<u8> {
    let mut body = parts.concat();
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Body with a single file part under `field`.
pub(crate) fn multipart_body(field: &str, file_name: &str, content: &[u8]) -> Vec<u8> {
    multipart_of(&[file_part(field, file_name, content)])
}

/// `GET /file` carrying `body` as multipart form data.
pub(crate) fn upload_request(body: Vec<u8>) -> Request {
    Request::builder()
        .method("GET")
        .uri("/file")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

/// Resolver returning a fixed URL, or a resolution error when `None`.
pub(crate) struct StubResolver(pub Option<&'static str>);

#[async_trait]
impl StorageUrlResolver for StubResolver {
    async fn find_storage_url(
        &self,
        _ctx: &RequestContext,
        _file: &FileHandle,
    ) -> Result<String, MetadataError> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| MetadataError::Resolution("stub resolver failure".into()))
    }
}

/// Resolver whose first call fails; later calls return `url`.
pub(crate) struct FailOnceResolver {
    pub url: &'static str,
    pub calls: AtomicUsize,
}

impl FailOnceResolver {
    pub(crate) fn new(url: &'static str) -> Self {
        Self {
            url,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StorageUrlResolver for FailOnceResolver {
    async fn find_storage_url(
        &self,
        _ctx: &RequestContext,
        _file: &FileHandle,
    ) -> Result<String, MetadataError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(MetadataError::Resolution("first call fails".into()))
        } else {
            Ok(self.url.to_string())
        }
    }
}

/// Provider that counts calls and remembers the last request context and file.
#[derive(Default)]
pub(crate) struct RecordingProvider {
    pub calls: AtomicUsize,
    pub last: Mutex<Option<(RequestContext, FileHandle)>>,
}

impl RecordingProvider {
    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for RecordingProvider {
    async fn get(
        &self,
        ctx: &RequestContext,
        file: &FileHandle,
    ) -> Result<Metadata, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((ctx.clone(), file.clone()));
        Ok(Metadata::new(99, "https://storage.example/recorded"))
    }
}

/// Application state around `metadata` with the default upload ceiling.
pub(crate) fn test_state(metadata: Arc<dyn MetadataProvider>) -> AppState {
    AppState {
        metadata,
        shutdown: Arc::new(ShutdownController::new()),
        max_upload_bytes: super::config::DEFAULT_MAX_UPLOAD_BYTES,
        start_time: Instant::now(),
    }
}
