//! Mock query provider for testing.

use std::sync::{Arc, Mutex};

use askdoc_core::query::{QueryProvider, QueryRequest, QueryResponse};
use askdoc_core::{Error, Result, ServiceHealth};
use jiff::Timestamp;

/// Mock query provider for testing.
///
/// Answers every question with the configured text, or fails per the
/// scripted status code or transport failure. Every received request is
/// recorded; clones share the same recorder.
#[derive(Clone, Debug)]
pub struct MockQueryProvider {
    status_code: u16,
    answer: Option<String>,
    transport_failure: bool,
    requests: Arc<Mutex<Vec<QueryRequest>>>,
}

impl MockQueryProvider {
    /// Creates a mock that answers every question with a fixed reply.
    pub fn new() -> Self {
        Self {
            status_code: 200,
            answer: Some("Mock answer".to_owned()),
            transport_failure: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every question with the given text.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Returns 2xx responses that carry no answer text.
    pub fn with_missing_answer(mut self) -> Self {
        self.answer = None;
        self
    }

    /// Responds to every question with the given status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Fails every question exchange at the transport level.
    pub fn with_transport_failure(mut self) -> Self {
        self.transport_failure = true;
        self
    }

    /// Returns copies of all requests received so far.
    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns the number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Default for MockQueryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryProvider for MockQueryProvider {
    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if self.transport_failure {
            return Err(Error::network_error().with_message("mock transport failure"));
        }

        let mut response =
            QueryResponse::new(request.request_id, self.status_code, Timestamp::now());
        if response.is_success() {
            if let Some(answer) = &self.answer {
                response = response.with_answer(answer);
            }
        }
        Ok(response)
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}
