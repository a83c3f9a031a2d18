//! In-flight request tracking for graceful drain.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::Response;
use tower::{Layer, Service};

use crate::network::shutdown::ShutdownController;

/// Tower layer that holds an [`InFlightGuard`](crate::network::InFlightGuard)
/// for the lifetime of each request.
#[derive(Debug, Clone)]
pub struct InFlightLayer {
    shutdown: Arc<ShutdownController>,
}

impl InFlightLayer {
    #[must_use]
    pub fn new(shutdown: Arc<ShutdownController>) -> Self {
        Self { shutdown }
    }
}

impl<S> Layer<S> for InFlightLayer {
    type Service = InFlightService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InFlightService {
            inner,
            shutdown: Arc::clone(&self.shutdown),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InFlightService<S> {
    inner: S,
    shutdown: Arc<ShutdownController>,
}

impl<S> Service<Request> for InFlightService<S>
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

    fn call(&mut self, req: Request) -> Self::Future {
        let guard = self.shutdown.in_flight_guard();
        let fut = self.inner.call(req);
        Box::pin(async move {
            let result = fut.await;
            drop(guard);
            result
        })
    }
}
