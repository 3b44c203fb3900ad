//! Document slot types and upload acceptance checks.
//!
//! A session holds at most one document. The slot tracks the document's
//! journey through upload and remote processing; transitions are monotonic
//! forward except for explicit removal, which resets the slot from any
//! status. There is no retry-in-place: a failed document must be removed
//! before another upload is accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum accepted document size, matching the backend's upload cap.
pub const MAX_DOCUMENT_BYTES: u64 = 50 * 1024 * 1024;

/// File extensions the upload affordance accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "doc", "docx"];

/// Processing status of the session's document slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// No document is attached; the slot is free.
    #[default]
    Empty,
    /// The file bytes are being sent to the ingestion service.
    Uploading,
    /// The ingestion service accepted the file and is processing it.
    Processing,
    /// The document is ready for questions.
    Ready,
    /// Upload or processing failed; the slot must be cleared before reuse.
    Failed,
}

impl DocumentStatus {
    /// Returns true if a new upload may be accepted.
    pub fn can_accept_upload(self) -> bool {
        self == Self::Empty
    }

    /// Returns true if an upload is mid-flight (uploading or processing).
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Uploading | Self::Processing)
    }

    /// Returns true if questions may be asked against the document.
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }
}

/// The session's single document slot.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSlot {
    /// Original filename, present whenever the slot is occupied.
    pub name: Option<String>,
    /// Size of the uploaded file in bytes.
    pub byte_size: u64,
    /// Current processing status.
    pub status: DocumentStatus,
}

impl DocumentSlot {
    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Occupies the slot with a new upload.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SlotOccupied`](crate::ErrorKind::SlotOccupied)
    /// if the slot already holds a document in any status.
    pub fn accept_upload(&mut self, name: impl Into<String>, byte_size: u64) -> Result<()> {
        if !self.status.can_accept_upload() {
            return Err(Error::slot_occupied()
                .with_message(format!("document slot is {}", self.status)));
        }

        self.name = Some(name.into());
        self.byte_size = byte_size;
        self.status = DocumentStatus::Uploading;
        Ok(())
    }

    /// Advances the slot from `Uploading` to `Processing`.
    ///
    /// Returns whether the transition was applied. A `false` result means
    /// the slot was cleared or failed in the meantime and the caller's
    /// transition is stale.
    pub fn mark_processing(&mut self) -> bool {
        self.advance(DocumentStatus::Uploading, DocumentStatus::Processing)
    }

    /// Advances the slot from `Processing` to `Ready`.
    pub fn mark_ready(&mut self) -> bool {
        self.advance(DocumentStatus::Processing, DocumentStatus::Ready)
    }

    /// Marks an in-flight upload as failed.
    pub fn mark_failed(&mut self) -> bool {
        if self.status.is_in_flight() {
            self.status = DocumentStatus::Failed;
            true
        } else {
            false
        }
    }

    /// Resets the slot to empty, regardless of current status. Idempotent.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    fn advance(&mut self, from: DocumentStatus, to: DocumentStatus) -> bool {
        if self.status == from {
            self.status = to;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Uploading => write!(f, "uploading"),
            Self::Processing => write!(f, "processing"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Checks a candidate file against the acceptance rules before any network
/// traffic is issued.
///
/// The backend enforces the same limits server-side; rejecting locally keeps
/// the failure visible without a wasted round-trip.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput) if
/// the filename has no accepted extension or the file exceeds
/// [`MAX_DOCUMENT_BYTES`].
pub fn validate_upload(name: &str, byte_size: u64) -> Result<()> {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    let accepted = extension
        .as_deref()
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext));

    if !accepted {
        return Err(Error::invalid_input()
            .with_message(format!("unsupported document type: {name}")));
    }

    if byte_size > MAX_DOCUMENT_BYTES {
        return Err(Error::invalid_input().with_message(format!(
            "document exceeds {} bytes: {byte_size}",
            MAX_DOCUMENT_BYTES
        )));
    }

    Ok(())
}

/// Derives a MIME type from a filename's extension.
///
/// Returns `None` for extensions outside [`ACCEPTED_EXTENSIONS`].
pub fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, extension) = name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        "doc" => Some("application/msword"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        _ => None,
    }
}
