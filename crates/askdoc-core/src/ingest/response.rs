//! Ingestion upload response type.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response from a completed upload exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Unique identifier for this response.
    pub response_id: Uuid,
    /// Request ID this response corresponds to.
    pub request_id: Uuid,
    /// HTTP status code from the ingestion endpoint.
    pub status_code: u16,
    /// Decoded response body, if the endpoint returned JSON. The client
    /// places no constraint on its contents; it is kept for logging.
    pub body: Option<serde_json::Value>,
    /// Timestamp when the request was initiated.
    pub started_at: Timestamp,
    /// Timestamp when the response was received.
    pub finished_at: Timestamp,
}

impl IngestResponse {
    /// Creates a new ingestion response.
    pub fn new(request_id: Uuid, status_code: u16, started_at: Timestamp) -> Self {
        Self {
            response_id: Uuid::now_v7(),
            request_id,
            status_code,
            body: None,
            started_at,
            finished_at: Timestamp::now(),
        }
    }

    /// Attaches the decoded response body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns whether the upload was accepted (2xx status code).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Calculates the exchange time as a span.
    pub fn duration(&self) -> jiff::Span {
        self.started_at.until(self.finished_at).unwrap_or_default()
    }
}
