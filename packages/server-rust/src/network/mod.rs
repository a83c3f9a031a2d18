//! HTTP ingress: configuration, controllers, middleware chain, error
//! translation, and server lifecycle.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod module;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::*;
pub use error::ApiError;
pub use handlers::{AppState, Controller, Route};
pub use middleware::{apply_middleware, default_chain, HttpMiddleware, REQUEST_ID_HEADER};
pub use module::NetworkModule;
pub use shutdown::*;
