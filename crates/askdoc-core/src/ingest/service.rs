//! Ingestion service wrapper with observability.
//!
//! This module provides a wrapper around ingestion providers that adds
//! structured logging around every upload exchange.

use std::sync::Arc;

use super::{IngestProvider, IngestRequest, IngestResponse, TRACING_TARGET};
use crate::{Result, ServiceHealth};

/// Ingestion service wrapper with observability.
///
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct IngestService {
    inner: Arc<dyn IngestProvider>,
}

impl IngestService {
    /// Create a new ingestion service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: IngestProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Create from a boxed provider.
    pub fn from_boxed(provider: Box<dyn IngestProvider>) -> Self {
        Self {
            inner: Arc::from(provider),
        }
    }

    /// Uploads a document through the wrapped provider.
    pub async fn upload(&self, request: &IngestRequest) -> Result<IngestResponse> {
        let start = std::time::Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            filename = %request.filename,
            byte_size = request.byte_size(),
            "Uploading document"
        );

        let result = self.inner.upload(request).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    status_code = response.status_code,
                    accepted = response.is_success(),
                    elapsed_ms = elapsed.as_millis(),
                    "Upload exchange completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    request_id = %request.request_id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Upload failed"
                );
            }
        }

        result
    }

    /// Perform a health check on the ingestion service.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}

impl std::fmt::Debug for IngestService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestService").finish_non_exhaustive()
    }
}
