#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the main library
pub const TRACING_TARGET: &str = "askdoc_client";

/// Tracing target for ingestion uploads
pub const TRACING_TARGET_INGEST: &str = "askdoc_client::ingest";

/// Tracing target for query requests
pub const TRACING_TARGET_QUERY: &str = "askdoc_client::query";

mod config;
mod error;
mod ingest;
mod query;

pub use crate::config::{ApiConfig, ApiConfigBuilder, BASE_URL_ENV};
pub use crate::error::{Error, Result};
pub use crate::ingest::HttpIngestClient;
pub use crate::query::HttpQueryClient;
