//! DMS metadata core — file metadata values, error taxonomy, and identifier allocation.

pub mod context;
pub mod error;
pub mod id;
pub mod types;

pub use context::RequestContext;
pub use error::{ErrorKind, MetadataError};
pub use id::{IdGenerator, SequentialIdGenerator};
pub use types::{FileHandle, Metadata};
