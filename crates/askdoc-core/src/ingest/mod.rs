//! Document ingestion gateway abstraction.
//!
//! The ingestion service is an external backend that accepts an uploaded
//! document and prepares it for retrieval. This module defines the client's
//! expectations only: one multipart upload per document, a 2xx response
//! meaning acceptance, anything else meaning failure. Implement
//! [`IngestProvider`] to supply a concrete transport.

mod request;
mod response;
mod service;

pub use request::IngestRequest;
pub use response::IngestResponse;
pub use service::IngestService;

use crate::{Result, ServiceHealth};

/// Tracing target for ingestion operations.
pub const TRACING_TARGET: &str = crate::TRACING_TARGET_INGEST;

/// Core trait for document ingestion operations.
///
/// Implementations complete with `Ok` whenever an HTTP exchange finished,
/// carrying the status code in the response; they return `Err` only for
/// transport-level failures (connect, timeout, body read). This keeps the
/// rejected/transport distinction visible to the upload coordinator.
#[async_trait::async_trait]
pub trait IngestProvider: Send + Sync {
    /// Uploads a document to the ingestion service.
    async fn upload(&self, request: &IngestRequest) -> Result<IngestResponse>;

    /// Performs a health check on the ingestion provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
