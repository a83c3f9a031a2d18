//! Network module with deferred startup lifecycle.
//!
//! `new()` wires shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::config::NetworkConfig;
use super::handlers::{mount, AppState, HealthController, MetadataController};
use super::middleware::{apply_middleware, default_chain};
use super::shutdown::ShutdownController;
use crate::traits::MetadataProvider;

/// How long `serve()` waits for in-flight requests after the listener closes.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the listener and the state shared by every request.
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    shutdown: Arc<ShutdownController>,
    metadata: Arc<dyn MetadataProvider>,
    start_time: Instant,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, metadata: Arc<dyn MetadataProvider>) -> Self {
        Self {
            config,
            listener: None,
            shutdown: Arc::new(ShutdownController::new()),
            metadata,
            start_time: Instant::now(),
        }
    }

    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles controllers and the default middleware chain.
    ///
    /// Routes:
    /// - `GET /file` -- issue metadata for an upload
    /// - `GET /health` -- lifecycle JSON
    /// - `GET /health/live` -- liveness probe
    /// - `GET /health/ready` -- readiness probe
    pub fn build_router(&self) -> Router {
        let state = AppState {
            metadata: Arc::clone(&self.metadata),
            shutdown: Arc::clone(&self.shutdown),
            max_upload_bytes: self.config.max_upload_bytes,
            start_time: self.start_time,
        };

        let metadata = MetadataController::new(self.config.max_upload_bytes);
        let router = mount(&[&metadata, &HealthController]).with_state(state);

        apply_middleware(router, &default_chain(&self.config, &self.shutdown))
    }

    /// Binds the listener and returns the bound port (useful with port 0).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    ///
    /// The health state is `Ready` while serving, `Draining` from the moment
    /// the signal fires, and `Stopped` once every request has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called or the server hits a
    /// fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;
        let shutdown_ctrl = self.shutdown;

        let signal_ctrl = Arc::clone(&shutdown_ctrl);
        let signal = async move {
            shutdown.await;
            info!("shutdown signal received, draining");
            signal_ctrl.trigger_shutdown();
        };

        shutdown_ctrl.set_ready();
        info!("serving HTTP on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .await?;

        if shutdown_ctrl.wait_for_drain(DRAIN_TIMEOUT).await {
            info!("all requests drained");
        } else {
            warn!("drain timeout expired with in-flight requests remaining");
        }
        Ok(())
    }
}
