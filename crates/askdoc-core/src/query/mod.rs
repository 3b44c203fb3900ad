//! Question answering gateway abstraction.
//!
//! The query service is an external backend that answers a question using a
//! previously ingested document. The client sends one question at a time and
//! expects the answer text in the response body; answer rendering (markdown
//! or otherwise) is the embedding application's concern.

mod request;
mod response;
mod service;

pub use request::QueryRequest;
pub use response::QueryResponse;
pub use service::QueryService;

use crate::{Result, ServiceHealth};

/// Tracing target for query operations.
pub const TRACING_TARGET: &str = crate::TRACING_TARGET_QUERY;

/// Core trait for question answering operations.
///
/// As with ingestion, implementations return `Ok` for any completed HTTP
/// exchange (the status code travels in the response) and `Err` only for
/// transport or decode failures.
#[async_trait::async_trait]
pub trait QueryProvider: Send + Sync {
    /// Asks a question against an ingested document.
    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// Performs a health check on the query provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
