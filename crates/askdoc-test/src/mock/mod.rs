//! Mock implementations of the askdoc gateways for testing.
//!
//! This module provides mock implementations of the ingestion and query
//! providers defined in askdoc-core, plus a manually released completion
//! source. The mocks record the requests they receive so tests can assert
//! on wire-level behavior without a real backend.

mod completion;
mod ingest;
mod query;

pub use completion::ManualCompletion;
pub use ingest::MockIngestProvider;
pub use query::MockQueryProvider;
