//! Question response type.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response from a completed question exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Unique identifier for this response.
    pub response_id: Uuid,
    /// Request ID this response corresponds to.
    pub request_id: Uuid,
    /// HTTP status code from the query endpoint.
    pub status_code: u16,
    /// The answer text, present on successful exchanges. May contain
    /// markdown syntax; it is passed through verbatim.
    pub answer: Option<String>,
    /// Timestamp when the request was initiated.
    pub started_at: Timestamp,
    /// Timestamp when the response was received.
    pub finished_at: Timestamp,
}

impl QueryResponse {
    /// Creates a new query response.
    pub fn new(request_id: Uuid, status_code: u16, started_at: Timestamp) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            request_id,
            status_code,
            answer: None,
            started_at,
            finished_at: Timestamp::now(),
        }
    }

    /// Attaches the answer text.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Returns whether the question was answered (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Calculates the exchange time as a span.
    pub fn duration(&self) -> jiff::Span {
        self.started_at.until(self.finished_at).unwrap_or_default()
    }
}
