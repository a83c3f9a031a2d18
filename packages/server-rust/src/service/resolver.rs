//! Storage URL resolution.
//!
//! The only policy today is a constant URL taken from configuration; the file
//! handle is ignored. Content-aware routing would be another
//! [`StorageUrlResolver`] implementation.

use async_trait::async_trait;
use dms_metadata_core::{FileHandle, MetadataError, RequestContext};

use crate::traits::StorageUrlResolver;

/// Environment variable holding the storage service base URL.
pub const STORAGE_SERVICE_URL_VAR: &str = "STORAGE_SERVICE_URL";

/// Resolver returning a fixed, configured storage URL.
///
/// An absent or blank URL is not a startup error: every call reports
/// `MetadataError::Resolution` instead, so the service stays up and answers
/// with a 500 until it is configured.
#[derive(Debug, Clone)]
pub struct ConfiguredStorageUrlResolver {
    storage_url: Option<String>,
}

impl ConfiguredStorageUrlResolver {
    /// Creates a resolver for the given URL.
    #[must_use]
    pub fn new(storage_url: Option<String>) -> Self {
        let storage_url = storage_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        Self { storage_url }
    }

    /// Creates a resolver from the named environment variable, read once now.
    #[must_use]
    pub fn from_env(var: &str) -> Self {
        Self::new(std::env::var(var).ok())
    }
}

#[async_trait]
impl StorageUrlResolver for ConfiguredStorageUrlResolver {
    async fn find_storage_url(
        &self,
        _ctx: &RequestContext,
        _file: &FileHandle,
    ) -> Result<String, MetadataError> {
        self.storage_url.clone().ok_or_else(|| {
            MetadataError::Resolution(format!(
                "storage service URL is not configured ({STORAGE_SERVICE_URL_VAR})"
            ))
        })
    }
}
