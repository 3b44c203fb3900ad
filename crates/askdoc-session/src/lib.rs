#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for upload coordination
pub const TRACING_TARGET_UPLOAD: &str = "askdoc_session::upload";

/// Tracing target for chat coordination
pub const TRACING_TARGET_CHAT: &str = "askdoc_session::chat";

mod completion;
mod controller;

pub use crate::completion::{DEFAULT_PROCESSING_DELAY, FixedDelay};
pub use crate::controller::SessionController;

pub use askdoc_core::completion::CompletionSource;
