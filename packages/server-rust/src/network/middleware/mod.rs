//! HTTP middleware chain for the metadata server.
//!
//! The chain is data: an ordered list of [`HttpMiddleware`] values folded
//! onto the router at construction time. The first element is the outermost
//! layer (it sees the request first on the way in and the response last on
//! the way out).
//!
//! - [`access_log`]: one completion log line per request
//! - [`request_id`]: correlation id injection and propagation
//! - [`in_flight`]: in-flight request accounting for graceful drain

pub mod access_log;
pub mod in_flight;
pub mod request_id;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::timeout::TimeoutLayer;

pub use access_log::{access_log_layer, AccessLogLayer};
pub use in_flight::InFlightLayer;
pub use request_id::{RequestIdLayer, REQUEST_ID_HEADER};

use super::config::NetworkConfig;
use super::shutdown::ShutdownController;

/// One decorator in the HTTP middleware chain.
#[derive(Debug, Clone)]
pub enum HttpMiddleware {
    /// Logs method, path, status, and latency.
    AccessLog,
    /// Attaches a correlation id to the request, its span, and its response.
    RequestId,
    /// Counts the request as in flight until its response is produced.
    InFlight(Arc<ShutdownController>),
    /// Answers 408 when the inner chain exceeds the duration.
    Timeout(Duration),
}

impl HttpMiddleware {
    fn wrap<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        match self {
            Self::AccessLog => router.layer(access_log_layer()),
            Self::RequestId => router.layer(RequestIdLayer),
            Self::InFlight(shutdown) => router.layer(InFlightLayer::new(Arc::clone(shutdown))),
            Self::Timeout(duration) => router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                *duration,
            )),
        }
    }
}

/// Builds the standard chain, outermost first:
/// 1. `AccessLog` -- wraps everything, so its entry carries the request id
/// 2. `RequestId` -- records the id into the access-log span before delegating
/// 3. `InFlight` -- tracks the request for shutdown draining
/// 4. `Timeout` -- bounds handler time
#[must_use]
pub fn default_chain(
    config: &NetworkConfig,
    shutdown: &Arc<ShutdownController>,
) -> Vec<HttpMiddleware> {
    vec![
        HttpMiddleware::AccessLog,
        HttpMiddleware::RequestId,
        HttpMiddleware::InFlight(Arc::clone(shutdown)),
        HttpMiddleware::Timeout(config.request_timeout),
    ]
}

/// Applies `chain` to `router` so that `chain[0]` is the outermost layer.
#[must_use]
pub fn apply_middleware<S>(router: Router<S>, chain: &[HttpMiddleware]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // `Router::layer` wraps everything added so far, so the last layer applied
    // ends up outermost: fold from the innermost end.
    chain
        .iter()
        .rev()
        .fold(router, |router, middleware| middleware.wrap(router))
}
