//! Ingestion upload request type.

use bytes::Bytes;
use uuid::Uuid;

/// A document upload request.
///
/// The `request_id` identifies one `upload` call end to end; coordinators
/// key stale-response suppression on it rather than on the filename.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// Original filename, forwarded as the multipart part's filename.
    pub filename: String,
    /// Raw file bytes.
    pub content: Bytes,
    /// MIME type of the content, if known.
    pub content_type: Option<String>,
}

impl IngestRequest {
    /// Creates a new upload request.
    pub fn new(filename: impl Into<String>, content: Bytes) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            filename: filename.into(),
            content,
            content_type: None,
        }
    }

    /// Sets the MIME type of the content.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the size of the file in bytes.
    pub fn byte_size(&self) -> u64 {
        self.content.len() as u64
    }
}
