//! HTTP handlers and the route tables that expose them.
//!
//! Each controller publishes its routes as data ([`Route`] values); the
//! network module mounts every table onto one router. `AppState` is the
//! shared state carried through axum extractors.

pub mod health;
pub mod metadata;

pub use health::{health_handler, liveness_handler, readiness_handler, HealthController};
pub use metadata::{get_metadata, MetadataController, MetadataResponse, UPLOAD_FIELD};

use std::sync::Arc;
use std::time::Instant;

use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::http::{Method, Uri};
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use dms_metadata_core::MetadataError;

use super::error::ApiError;
use super::shutdown::ShutdownController;
use crate::traits::MetadataProvider;

/// Shared application state passed to all handlers via `State` extraction.
///
/// Holds `Arc` references so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Composes metadata for upload requests.
    pub metadata: Arc<dyn MetadataProvider>,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Body ceiling of the upload route, used in validation messages.
    pub max_upload_bytes: usize,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

/// One entry of a controller's route table.
pub struct Route {
    pub path: &'static str,
    pub method: MethodFilter,
    pub handler: MethodRouter<AppState>,
}

impl Route {
    pub fn new<H, T>(path: &'static str, method: MethodFilter, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            path,
            method,
            handler: on(method, handler),
        }
    }

    /// Caps the request body accepted by this route.
    #[must_use]
    pub fn with_body_limit(mut self, max_bytes: usize) -> Self {
        self.handler = self.handler.layer(DefaultBodyLimit::max(max_bytes));
        self
    }
}

/// A group of routes exposed to the hosting server.
pub trait Controller: Send + Sync {
    fn routes(&self) -> Vec<Route>;
}

/// Mounts every controller's route table onto one router.
///
/// Requests matching no route are answered through [`ApiError`] as
/// `NotFound`.
pub fn mount(controllers: &[&dyn Controller]) -> Router<AppState> {
    controllers
        .iter()
        .flat_map(|controller| controller.routes())
        .fold(Router::new(), |router, route| {
            router.route(route.path, route.handler)
        })
        .fallback(route_not_found)
}

/// Fallback for unmatched paths.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    MetadataError::NotFound(format!("no route for {method} {}", uri.path())).into()
}
