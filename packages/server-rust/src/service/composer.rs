//! Metadata composition: one identifier plus one storage URL per request.

use std::sync::Arc;

use async_trait::async_trait;
use dms_metadata_core::{FileHandle, IdGenerator, Metadata, MetadataError, RequestContext};
use tracing::error;

use crate::traits::{MetadataProvider, StorageUrlResolver};

/// Builds [`Metadata`] from an injected allocator and resolver.
///
/// The identifier is allocated before the URL is resolved. When resolution
/// fails the identifier is dropped, leaving a gap in the sequence; it is
/// never handed out again.
pub struct MetadataComposer {
    ids: Arc<dyn IdGenerator>,
    resolver: Arc<dyn StorageUrlResolver>,
}

impl MetadataComposer {
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, resolver: Arc<dyn StorageUrlResolver>) -> Self {
        Self { ids, resolver }
    }
}

#[async_trait]
impl MetadataProvider for MetadataComposer {
    async fn get(
        &self,
        ctx: &RequestContext,
        file: &FileHandle,
    ) -> Result<Metadata, MetadataError> {
        let id = self.ids.generate_id();

        let upload_url = match self.resolver.find_storage_url(ctx, file).await {
            Ok(url) if url.is_empty() => Err(MetadataError::Resolution(
                "resolver returned an empty storage URL".to_string(),
            )),
            other => other,
        }
        .inspect_err(|err| {
            error!(
                request_id = %ctx.request_id,
                discarded_id = id,
                error = %err,
                "failed to resolve storage URL"
            );
        })?;

        Ok(Metadata::new(id, upload_url))
    }
}
