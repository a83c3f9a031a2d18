//! `GET /file`: validates an upload request and issues its metadata.

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::routing::MethodFilter;
use axum::Json;
use dms_metadata_core::{FileHandle, Metadata, MetadataError, RequestContext};
use serde::Serialize;
use uuid::Uuid;

use super::{AppState, Controller, Route};
use crate::network::error::ApiError;

/// Multipart field that must carry the file.
pub const UPLOAD_FIELD: &str = "uploadFile";

/// Success body of `GET /file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataResponse {
    #[serde(rename = "storageURL")]
    pub storage_url: String,
    pub id: i64,
}

impl From<&Metadata> for MetadataResponse {
    fn from(metadata: &Metadata) -> Self {
        Self {
            storage_url: metadata.upload_url().to_string(),
            id: metadata.id(),
        }
    }
}

/// Route table for metadata issuance.
#[derive(Debug, Clone, Copy)]
pub struct MetadataController {
    max_upload_bytes: usize,
}

impl MetadataController {
    #[must_use]
    pub fn new(max_upload_bytes: usize) -> Self {
        Self { max_upload_bytes }
    }
}

impl Controller for MetadataController {
    fn routes(&self) -> Vec<Route> {
        vec![Route::new("/file", MethodFilter::GET, get_metadata)
            .with_body_limit(self.max_upload_bytes)]
    }
}

/// Validates the upload, then asks the metadata provider for an id and URL.
///
/// Validation failures and provider errors are returned as [`ApiError`];
/// the provider is only called once validation has passed.
pub async fn get_metadata(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<MetadataResponse>, ApiError> {
    // Set by the request-id middleware; a router mounted without it still works.
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::new(Uuid::new_v4().to_string()));

    let file = read_upload(request, &state).await?;
    let metadata = state.metadata.get(&ctx, &file).await?;

    Ok(Json(MetadataResponse::from(&metadata)))
}

/// Streams the whole multipart body and returns a handle for the first file
/// part named [`UPLOAD_FIELD`].
///
/// Field contents are counted and dropped chunk by chunk, so nothing of the
/// file outlives this function. Every field is drained so the body ceiling
/// applies to the complete request.
async fn read_upload(request: Request, state: &AppState) -> Result<FileHandle, MetadataError> {
    let limit = state.max_upload_bytes;
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|rejection| {
            MetadataError::InvalidInput(format!(
                "expected a multipart/form-data body: {}",
                rejection.body_text()
            ))
        })?;

    let mut upload = None;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(&err, limit))?
    {
        let file_name = field.file_name().map(str::to_string);
        // A plain form value under the upload name is not a file.
        let is_upload =
            upload.is_none() && file_name.is_some() && field.name() == Some(UPLOAD_FIELD);
        let content_type = field.content_type().map(str::to_string);

        let mut size = 0u64;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| multipart_error(&err, limit))?
        {
            size += chunk.len() as u64;
        }

        if is_upload {
            upload = Some(FileHandle {
                file_name,
                content_type,
                size,
            });
        }
    }

    upload.ok_or_else(|| {
        MetadataError::InvalidInput(format!("no file provided in field '{UPLOAD_FIELD}'"))
    })
}

fn multipart_error(err: &MultipartError, limit: usize) -> MetadataError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MetadataError::InvalidInput(format!(
            "uploaded file is too big: maximum size is {}",
            describe_size(limit)
        ))
    } else {
        MetadataError::InvalidInput(format!("malformed multipart body: {}", err.body_text()))
    }
}

fn describe_size(bytes: usize) -> String {
    const MIB: usize = 1 << 20;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
