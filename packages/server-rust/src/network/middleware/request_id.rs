//! Request ID middleware for log correlation.
//!
//! Uses the incoming `x-request-id` header when an upstream proxy supplied
//! one, otherwise generates a UUID v4. The id is:
//! - recorded into the current tracing span
//! - inserted into request extensions as a [`RequestContext`]
//! - echoed back in the response `x-request-id` header

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::response::Response;
use dms_metadata_core::RequestContext;
use tower::{Layer, Service};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Propagated ids longer than this are replaced with a generated one.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Tower layer that attaches a correlation id to every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

/// Returns the propagated id if usable, otherwise a fresh UUID v4.
fn request_id_for(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

impl<S> Service<Request> for RequestIdService<S>
where
    S: Service<Request, Response = Response> + Send,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let request_id = request_id_for(&req);

        Span::current().record("request_id", request_id.as_str());
        req.extensions_mut()
            .insert(RequestContext::new(request_id.clone()));

        let fut = self.inner.call(req);
        Box::pin(async move {
            let mut response = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                response.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Ok(response)
        })
    }
}
