//! Ingestion client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use askdoc_core::ServiceHealth;
use askdoc_core::ingest::{IngestProvider, IngestRequest, IngestResponse};
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::TRACING_TARGET_INGEST as TRACING_TARGET;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Path of the document upload endpoint, relative to the base URL.
const UPLOAD_PATH: &str = "/api/uploadFile";

/// Inner client that holds the HTTP client and configuration.
struct IngestClientInner {
    http: Client,
    config: ApiConfig,
}

impl std::fmt::Debug for IngestClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client for uploading documents to the ingestion service.
///
/// This client implements the [`IngestProvider`] trait. The file travels as
/// a single multipart request with the raw bytes in a `file` field; no
/// streaming progress is consumed.
///
/// # Examples
///
/// ```rust,ignore
/// use askdoc_client::{ApiConfig, HttpIngestClient};
/// use askdoc_core::ingest::IngestRequest;
/// use bytes::Bytes;
///
/// let config = ApiConfig::from_env()?;
/// let client = HttpIngestClient::new(config)?;
///
/// let request = IngestRequest::new("report.pdf", Bytes::from(bytes));
/// let response = client.upload(&request).await?;
/// assert!(response.is_success());
/// ```
#[derive(Clone, Debug)]
pub struct HttpIngestClient {
    inner: Arc<IngestClientInner>,
}

impl HttpIngestClient {
    /// Creates a new ingestion client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            "Creating ingestion client"
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let inner = IngestClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new ingestion client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Converts this client into an [`IngestService`] for dependency injection.
    ///
    /// [`IngestService`]: askdoc_core::ingest::IngestService
    pub fn into_service(self) -> askdoc_core::ingest::IngestService {
        askdoc_core::ingest::IngestService::new(self)
    }

    fn upload_url(&self) -> Result<reqwest::Url> {
        self.inner
            .config
            .base_url
            .join(UPLOAD_PATH)
            .map_err(|e| Error::invalid_config(format!("Invalid upload URL: {}", e)))
    }
}

#[async_trait::async_trait]
impl IngestProvider for HttpIngestClient {
    async fn upload(&self, request: &IngestRequest) -> askdoc_core::Result<IngestResponse> {
        let started_at = jiff::Timestamp::now();
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            filename = %request.filename,
            byte_size = request.byte_size(),
            "Uploading document"
        );

        let url = self.upload_url().map_err(askdoc_core::Error::from)?;

        let mut part = Part::bytes(request.content.to_vec()).file_name(request.filename.clone());
        if let Some(content_type) = &request.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| askdoc_core::Error::from(Error::Reqwest(e)))?;
        }
        let form = Form::new().part("file", part);

        let http_response = self
            .inner
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| askdoc_core::Error::from(Error::Reqwest(e)))?;

        let status_code = http_response.status().as_u16();
        let elapsed = start.elapsed();

        // The body contents are unconstrained by the client; decode
        // leniently and keep whatever JSON came back for logging.
        let body = http_response.json::<serde_json::Value>().await.ok();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status_code,
            elapsed_ms = elapsed.as_millis(),
            "Upload exchange completed"
        );

        let mut response = IngestResponse::new(request.request_id, status_code, started_at);
        if let Some(body) = body {
            response = response.with_body(body);
        }

        Ok(response)
    }

    async fn health_check(&self) -> askdoc_core::Result<ServiceHealth> {
        // The backend exposes no dedicated health route; the client is
        // stateless and healthy if it was created successfully.
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig::builder()
            .with_base_url("http://localhost:8000")
            .expect("Valid URL")
            .build()
            .expect("Valid config")
    }

    #[test]
    fn test_client_creation() {
        let client = HttpIngestClient::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_upload_url_join() {
        let client = HttpIngestClient::new(test_config()).unwrap();
        let url = client.upload_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/uploadFile");
    }

    #[tokio::test]
    async fn test_health_check() {
        let client = HttpIngestClient::new(test_config()).unwrap();
        let health = client.health_check().await.unwrap();
        assert_eq!(health.status, askdoc_core::ServiceStatus::Healthy);
    }
}
