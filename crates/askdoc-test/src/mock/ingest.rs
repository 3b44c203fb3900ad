//! Mock ingestion provider for testing.

use std::sync::{Arc, Mutex};

use askdoc_core::ingest::{IngestProvider, IngestRequest, IngestResponse};
use askdoc_core::{Error, Result, ServiceHealth};
use jiff::Timestamp;

/// Mock ingestion provider for testing.
///
/// Returns the configured status code for every upload, or a transport
/// failure when one is scripted. Every received request is recorded;
/// clones share the same recorder.
#[derive(Clone, Debug)]
pub struct MockIngestProvider {
    status_code: u16,
    transport_failure: bool,
    requests: Arc<Mutex<Vec<IngestRequest>>>,
}

impl MockIngestProvider {
    /// Creates a mock that accepts every upload with HTTP 200.
    pub fn new() -> Self {
        Self {
            status_code: 200,
            transport_failure: false,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Responds to every upload with the given status code.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Fails every upload exchange at the transport level.
    pub fn with_transport_failure(mut self) -> Self {
        self.transport_failure = true;
        self
    }

    /// Returns copies of all requests received so far.
    pub fn requests(&self) -> Vec<IngestRequest> {
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

impl Default for MockIngestProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IngestProvider for MockIngestProvider {
    async fn upload(&self, request: &IngestRequest) -> Result<IngestResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if self.transport_failure {
            return Err(Error::network_error().with_message("mock transport failure"));
        }

        Ok(IngestResponse::new(
            request.request_id,
            self.status_code,
            Timestamp::now(),
        ))
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}
