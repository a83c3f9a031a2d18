//! DMS metadata server — issues an identifier and an upload URL for files
//! about to be stored in the distributed storage backend.
//!
//! Request path: middleware chain -> controller -> [`MetadataComposer`]
//! -> {identifier allocator, storage URL resolver}.

pub mod network;
pub mod service;
pub mod traits;

pub use service::{ConfiguredStorageUrlResolver, MetadataComposer};
pub use traits::{MetadataProvider, StorageUrlResolver};
