//! Session workflow controller.
//!
//! `SessionController` owns a [`SessionState`] and drives both coordinators
//! against it: document upload through the ingestion service and chat
//! through the query service. The state mutex is held only for transitions,
//! never across an await; stale transitions after `remove_document` are
//! suppressed by an upload generation counter that every in-flight upload
//! re-checks before applying its outcome.

use std::sync::{Arc, Mutex, MutexGuard};

use askdoc_core::completion::CompletionSource;
use askdoc_core::ingest::{IngestRequest, IngestService};
use askdoc_core::query::{QueryRequest, QueryService};
use askdoc_core::types::{Message, SessionState, content_type_for, validate_upload};
use askdoc_core::{Error, Result};
use bytes::Bytes;

use crate::completion::FixedDelay;
use crate::{TRACING_TARGET_CHAT, TRACING_TARGET_UPLOAD};

#[derive(Debug, Default)]
struct ControllerState {
    session: SessionState,
    /// Bumped on every accepted upload and on removal. An upload whose
    /// recorded generation no longer matches has been superseded and must
    /// not touch the slot.
    upload_generation: u64,
}

struct ControllerInner {
    state: Mutex<ControllerState>,
    ingest: IngestService,
    query: QueryService,
    completion: Arc<dyn CompletionSource>,
}

/// Workflow controller for one chat session.
///
/// Clones share the same session; the controller is cheap to clone and safe
/// to drive from multiple tasks. Concurrency is bounded by the state itself:
/// one document in the slot, one chat request pending, violations rejected
/// as typed errors rather than queued.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<ControllerInner>,
}

impl SessionController {
    /// Creates a controller with the default fixed-delay completion source.
    pub fn new(ingest: IngestService, query: QueryService) -> Self {
        Self::with_completion_source(ingest, query, FixedDelay::default())
    }

    /// Creates a controller with a custom completion source.
    pub fn with_completion_source<S>(
        ingest: IngestService,
        query: QueryService,
        completion: S,
    ) -> Self
    where
        S: CompletionSource + 'static,
    {
        Self {
            inner: Arc::new(ControllerInner {
                state: Mutex::new(ControllerState::default()),
                ingest,
                query,
                completion: Arc::new(completion),
            }),
        }
    }

    /// Returns a snapshot of the current session state.
    pub fn session(&self) -> SessionState {
        self.lock().session.clone()
    }

    /// Uploads a document into the session's single slot.
    ///
    /// The slot moves to `Uploading` before any network traffic, then to
    /// `Processing` once the ingestion service accepts the file, and to
    /// `Ready` when the completion source resolves. Any failure along the
    /// way leaves the slot `Failed`; there is no automatic retry. If the
    /// document is removed while this call is in flight, the removal wins
    /// and the late outcome is discarded.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - unsupported extension or file too large.
    /// * `SlotOccupied` - the slot already holds a document.
    /// * `Rejected` - the ingestion service returned a non-2xx status.
    /// * `NetworkError` / `Timeout` - the upload exchange did not complete.
    pub async fn submit_document(
        &self,
        filename: impl Into<String>,
        content: Bytes,
    ) -> Result<()> {
        let filename = filename.into();
        let byte_size = content.len() as u64;
        validate_upload(&filename, byte_size)?;

        let mut request = IngestRequest::new(&filename, content);
        if let Some(content_type) = content_type_for(&filename) {
            request = request.with_content_type(content_type);
        }

        let generation = {
            let mut state = self.lock();
            state.session.document.accept_upload(&filename, byte_size)?;
            state.upload_generation += 1;
            state.upload_generation
        };

        tracing::info!(
            target: TRACING_TARGET_UPLOAD,
            request_id = %request.request_id,
            filename = %filename,
            byte_size,
            "Document upload started"
        );

        let response = match self.inner.ingest.upload(&request).await {
            Ok(response) => response,
            Err(error) => {
                self.fail_upload(generation, &request, &error);
                return Err(error);
            }
        };

        if !response.is_success() {
            let error = Error::rejected()
                .with_message(format!("HTTP {}", response.status_code));
            self.fail_upload(generation, &request, &error);
            return Err(error);
        }

        {
            let mut state = self.lock();
            if state.upload_generation != generation {
                tracing::debug!(
                    target: TRACING_TARGET_UPLOAD,
                    request_id = %request.request_id,
                    "Upload superseded by removal, discarding acceptance"
                );
                return Ok(());
            }
            state.session.document.mark_processing();
        }

        if let Err(error) = self.inner.completion.wait_ready(request.request_id).await {
            self.fail_upload(generation, &request, &error);
            return Err(error);
        }

        let mut state = self.lock();
        if state.upload_generation != generation {
            tracing::debug!(
                target: TRACING_TARGET_UPLOAD,
                request_id = %request.request_id,
                "Upload superseded by removal, discarding readiness"
            );
            return Ok(());
        }
        state.session.document.mark_ready();

        tracing::info!(
            target: TRACING_TARGET_UPLOAD,
            request_id = %request.request_id,
            filename = %filename,
            "Document ready"
        );

        Ok(())
    }

    /// Removes the attached document, whatever its status. Idempotent.
    ///
    /// Any in-flight upload is orphaned: its late outcome will find the
    /// generation bumped and leave the slot untouched.
    pub fn remove_document(&self) {
        let mut state = self.lock();
        state.session.document.clear();
        state.upload_generation += 1;

        tracing::info!(
            target: TRACING_TARGET_UPLOAD,
            "Document removed"
        );
    }

    /// Sends a question against the ready document and returns the
    /// assistant's reply message.
    ///
    /// The user message is appended to the transcript before the request is
    /// sent and stays there on failure. The pending flag is cleared on every
    /// outcome; failures additionally record `last_error` on the session.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the question is empty after trimming.
    /// * `DocumentNotReady` - no ready document is attached.
    /// * `RequestPending` - a previous question has not resolved.
    /// * `Rejected` - the query service returned a non-2xx status.
    /// * `Serialization` - a 2xx response carried no answer.
    /// * `NetworkError` / `Timeout` - the exchange did not complete.
    pub async fn send_question(&self, text: &str) -> Result<Message> {
        let (message, document_name) = {
            let mut state = self.lock();
            let message = state.session.begin_question(text)?;
            let document_name = state
                .session
                .document_name()
                .unwrap_or_default()
                .to_owned();
            (message, document_name)
        };

        let request = QueryRequest::new(&message.content, document_name);

        tracing::info!(
            target: TRACING_TARGET_CHAT,
            request_id = %request.request_id,
            message_id = %message.id,
            "Question sent"
        );

        let outcome = match self.inner.query.ask(&request).await {
            Ok(response) if response.is_success() => match response.answer {
                Some(answer) => Ok(answer),
                None => Err(Error::serialization()
                    .with_message("answer missing from response body")),
            },
            Ok(response) => Err(Error::rejected()
                .with_message(format!("HTTP {}", response.status_code))),
            Err(error) => Err(error),
        };

        let mut state = self.lock();
        match outcome {
            Ok(answer) => {
                let reply = state.session.complete_question(answer);
                tracing::info!(
                    target: TRACING_TARGET_CHAT,
                    request_id = %request.request_id,
                    message_id = %reply.id,
                    "Answer received"
                );
                Ok(reply)
            }
            Err(error) => {
                state.session.fail_question(&error);
                tracing::warn!(
                    target: TRACING_TARGET_CHAT,
                    request_id = %request.request_id,
                    error = %error,
                    "Question failed"
                );
                Err(error)
            }
        }
    }

    fn fail_upload(&self, generation: u64, request: &IngestRequest, error: &Error) {
        let mut state = self.lock();
        if state.upload_generation != generation {
            tracing::debug!(
                target: TRACING_TARGET_UPLOAD,
                request_id = %request.request_id,
                "Upload superseded by removal, discarding failure"
            );
            return;
        }
        state.session.document.mark_failed();

        tracing::warn!(
            target: TRACING_TARGET_UPLOAD,
            request_id = %request.request_id,
            filename = %request.filename,
            error = %error,
            "Document upload failed"
        );
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        // A poisoned mutex only means another task panicked mid-transition;
        // the state itself is always left consistent by the operations above.
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController").finish_non_exhaustive()
    }
}
