//! Error taxonomy shared by every layer of the metadata service.
//!
//! Errors are tagged with their kind where they are detected and travel
//! unchanged up to the HTTP error translator, which is the only place that
//! turns a kind into a status code.

/// Closed set of error categories the HTTP layer knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, oversized, or missing client input.
    InvalidInput,
    /// The requested resource does not exist.
    NotFound,
    /// The storage URL could not be determined.
    ResolutionFailure,
    /// Anything unclassified.
    Internal,
}

/// Errors produced while validating a request or composing its metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage URL resolution failed: {0}")]
    Resolution(String),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl MetadataError {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Resolution(_) => ErrorKind::ResolutionFailure,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
