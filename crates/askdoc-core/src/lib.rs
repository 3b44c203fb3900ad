#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Askdoc Core
//!
//! This crate provides the foundational abstractions for the askdoc client.
//! It defines the session data model and the traits for the two external
//! gateways (document ingestion and question answering) without depending
//! on any concrete transport implementation.

/// Tracing target for ingestion operations.
pub const TRACING_TARGET_INGEST: &str = "askdoc_core::ingest";

/// Tracing target for query operations.
pub const TRACING_TARGET_QUERY: &str = "askdoc_core::query";

mod error;
mod health;

pub mod completion;
pub mod ingest;
pub mod query;
pub mod types;

// Re-export key types for convenience
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
