//! Metadata services behind the HTTP controller.
//!
//! - [`resolver`]: storage URL resolution from configuration
//! - [`composer`]: combines identifier allocation and URL resolution

pub mod composer;
pub mod resolver;

pub use composer::MetadataComposer;
pub use resolver::ConfiguredStorageUrlResolver;
