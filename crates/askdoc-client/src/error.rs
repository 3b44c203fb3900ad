//! Internal error types for askdoc-client.

use thiserror::Error;

/// Result type alias for askdoc-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for askdoc-client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<Error> for askdoc_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    askdoc_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    askdoc_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    askdoc_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    askdoc_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => askdoc_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Config(message) => askdoc_core::Error::configuration().with_message(message),
        }
    }
}
