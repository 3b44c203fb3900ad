//! Session data model for the askdoc client.
//!
//! These types model exactly what a chat screen needs to render: the
//! conversation transcript, the single attached document's status, and
//! whether a chat request is outstanding.

mod document;
mod message;
mod session;

pub use document::{
    ACCEPTED_EXTENSIONS, DocumentSlot, DocumentStatus, MAX_DOCUMENT_BYTES, content_type_for,
    validate_upload,
};
pub use message::{Message, MessageRole, Transcript};
pub use session::SessionState;
