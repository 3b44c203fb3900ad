//! Query service wrapper with observability.

use std::sync::Arc;

use super::{QueryProvider, QueryRequest, QueryResponse, TRACING_TARGET};
use crate::{Result, ServiceHealth};

/// Query service wrapper with observability.
///
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct QueryService {
    inner: Arc<dyn QueryProvider>,
}

impl QueryService {
    /// Create a new query service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: QueryProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create from a boxed provider.
    pub fn from_boxed(provider: Box<dyn QueryProvider>) -> Self {
        Self {
            inner: Arc::from(provider),
        }
    }

    /// Asks a question through the wrapped provider.
    pub async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let start = std::time::Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            document_name = %request.document_name,
            "Sending question"
        );

        let result = self.inner.ask(request).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    status_code = response.status_code,
                    answered = response.is_success(),
                    elapsed_ms = elapsed.as_millis(),
                    "Question exchange completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Question failed"
                );
            }
        }

        result
    }

    /// Perform a health check on the query service.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService").finish_non_exhaustive()
    }
}
