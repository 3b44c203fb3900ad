//! Question request type.

use uuid::Uuid;

/// A question to ask against an ingested document.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// The user's question, already trimmed by the coordinator.
    pub question: String,
    /// Name of the ingested document to query against.
    pub document_name: String,
}

impl QueryRequest {
    /// Creates a new question request.
    pub fn new(question: impl Into<String>, document_name: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            question: question.into(),
            document_name: document_name.into(),
        }
    }
}
