//! Network configuration types for the metadata server.

use std::time::Duration;

/// Largest request body accepted on the upload route: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Top-level network configuration for the server.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
    /// Hard ceiling on the request body of the upload route, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
