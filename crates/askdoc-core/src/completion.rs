//! Processing-completion signal abstraction.
//!
//! The ingestion backend acknowledges an upload but never signals when
//! processing actually finishes. The upload coordinator therefore takes an
//! injected [`CompletionSource`] that resolves when the document should be
//! considered ready. The production default is a fixed client-side delay
//! (see `askdoc-session`), which does not reflect real backend progress —
//! a polling or webhook source can be injected here without touching the
//! coordinator once the backend grows a completion signal.

use uuid::Uuid;

use crate::Result;

/// Source of the "document processing finished" signal.
///
/// Implementations resolve once the upload identified by `request_id` may
/// transition from `Processing` to `Ready`. The coordinator suppresses
/// resolutions for uploads that were removed in the meantime; sources do
/// not need to handle cancellation themselves.
#[async_trait::async_trait]
pub trait CompletionSource: Send + Sync {
    /// Waits until the given upload should be considered ready.
    async fn wait_ready(&self, request_id: Uuid) -> Result<()>;
}
