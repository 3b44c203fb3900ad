//! Session state record and guarded mutations.
//!
//! `SessionState` is the single source of truth for one chat session. The
//! coordinators in `askdoc-session` drive it exclusively through the named
//! operations below; each operation re-checks its own precondition so the
//! invariants hold even if a caller skips the controller's guards.

use serde::{Deserialize, Serialize};

use super::{DocumentSlot, Message};
use crate::types::Transcript;
use crate::{Error, Result};

/// State for one chat session: transcript, document slot, and the
/// pending-request flag. Lives for one session only; nothing is persisted.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Conversation transcript in insertion order.
    pub transcript: Transcript,
    /// The single attached document.
    pub document: DocumentSlot,
    /// True while a chat request is in flight.
    pub pending_request: bool,
    /// Most recent chat failure, cleared when the next question is accepted.
    pub last_error: Option<String>,
}

impl SessionState {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a question for sending: appends the user message
    /// optimistically and raises the pending flag.
    ///
    /// The returned message is the one appended to the transcript.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - `text` is empty after trimming whitespace.
    /// * `DocumentNotReady` - the document is not in `Ready` status.
    /// * `RequestPending` - a previous question has not resolved yet.
    pub fn begin_question(&mut self, text: &str) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::invalid_input().with_message("question is empty"));
        }
        if !self.document.status.is_ready() {
            return Err(Error::document_not_ready()
                .with_message(format!("document is {}", self.document.status)));
        }
        if self.pending_request {
            return Err(Error::request_pending());
        }

        let message = Message::user(text);
        self.transcript.push(message.clone());
        self.pending_request = true;
        self.last_error = None;
        Ok(message)
    }

    /// Resolves the pending question with an answer: appends the assistant
    /// message and clears the pending flag.
    pub fn complete_question(&mut self, answer: impl Into<String>) -> Message {
        let message = Message::assistant(answer);
        self.transcript.push(message.clone());
        self.pending_request = false;
        message
    }

    /// Resolves the pending question with a failure: clears the pending
    /// flag and records the error for display. The flag is never left
    /// raised, whatever the failure was.
    pub fn fail_question(&mut self, error: &Error) {
        self.pending_request = false;
        self.last_error = Some(error.to_string());
    }

    /// Returns the name of the attached document, if any.
    pub fn document_name(&self) -> Option<&str> {
        self.document.name.as_deref()
    }
}
