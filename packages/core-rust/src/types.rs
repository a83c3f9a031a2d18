/// Outcome of one allocation request: a fresh identifier plus the URL the
/// client must upload the file to.
///
/// Fields are private so a constructed value cannot be altered. Metadata is
/// built per request and discarded once the response is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    id: i64,
    upload_url: String,
}

impl Metadata {
    /// Builds a metadata value from an allocated identifier and a resolved URL.
    #[must_use]
    pub fn new(id: i64, upload_url: impl Into<String>) -> Self {
        Self {
            id,
            upload_url: upload_url.into(),
        }
    }

    /// Identifier unique for the lifetime of the process.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Destination the client uploads the file to.
    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

/// Descriptor of a file announced in an upload request.
///
/// The bytes themselves are never retained: the HTTP layer streams the
/// multipart field, counts it, and drops it before building this handle.
/// Only presence and size are observable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHandle {
    /// File name supplied by the client, if any.
    pub file_name: Option<String>,
    /// Content type supplied by the client, if any.
    pub content_type: Option<String>,
    /// Number of bytes the client sent for the file.
    pub size: u64,
}
