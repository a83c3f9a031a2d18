use async_trait::async_trait;
use dms_metadata_core::{FileHandle, Metadata, MetadataError, RequestContext};

/// Decides where an uploaded file should be stored.
///
/// Implementations may block on I/O (configuration lookups, service
/// discovery); callers never hold a lock across this call. A resolver that
/// cannot produce a URL returns `MetadataError::Resolution`.
#[async_trait]
pub trait StorageUrlResolver: Send + Sync {
    /// Returns the destination URL for `file`.
    async fn find_storage_url(
        &self,
        ctx: &RequestContext,
        file: &FileHandle,
    ) -> Result<String, MetadataError>;
}

/// Produces the metadata issued to a client for one upload request.
/// The controller depends on this trait so handlers can be tested with stubs.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Allocates an identifier and resolves a storage URL for `file`.
    async fn get(&self, ctx: &RequestContext, file: &FileHandle)
        -> Result<Metadata, MetadataError>;
}
