//! Query client implementation using reqwest.

use std::sync::Arc;
use std::time::Instant;

use askdoc_core::ServiceHealth;
use askdoc_core::query::{QueryProvider, QueryRequest, QueryResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_QUERY as TRACING_TARGET;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Path of the question endpoint, relative to the base URL.
const ASK_PATH: &str = "/api/askLLM";

/// Wire format of the question request body.
#[derive(Debug, Serialize)]
struct AskBody<'a> {
    question: &'a str,
    #[serde(rename = "fileName")]
    file_name: &'a str,
}

/// Wire format of a successful question response body.
///
/// The backend also returns `success` and `message` fields; only `data`
/// carries the answer text.
#[derive(Debug, Deserialize)]
struct AnswerBody {
    data: String,
}

/// Inner client that holds the HTTP client and configuration.
struct QueryClientInner {
    http: Client,
    config: ApiConfig,
}

impl std::fmt::Debug for QueryClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClientInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client for asking questions against ingested documents.
///
/// This client implements the [`QueryProvider`] trait: one JSON request
/// carrying `{question, fileName}`, one JSON response carrying the answer
/// text in a `data` field.
#[derive(Clone, Debug)]
pub struct HttpQueryClient {
    inner: Arc<QueryClientInner>,
}

impl HttpQueryClient {
    /// Creates a new query client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis(),
            "Creating query client"
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let inner = QueryClientInner { http, config };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new query client configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Converts this client into a [`QueryService`] for dependency injection.
    ///
    /// [`QueryService`]: askdoc_core::query::QueryService
    pub fn into_service(self) -> askdoc_core::query::QueryService {
        askdoc_core::query::QueryService::new(self)
    }

    fn ask_url(&self) -> Result<reqwest::Url> {
        self.inner
            .config
            .base_url
            .join(ASK_PATH)
            .map_err(|e| Error::invalid_config(format!("Invalid ask URL: {}", e)))
    }
}

#[async_trait::async_trait]
impl QueryProvider for HttpQueryClient {
    async fn ask(&self, request: &QueryRequest) -> askdoc_core::Result<QueryResponse> {
        let started_at = jiff::Timestamp::now();
        let start = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            document_name = %request.document_name,
            "Sending question"
        );

        let url = self.ask_url().map_err(askdoc_core::Error::from)?;
        let body = AskBody {
            question: &request.question,
            file_name: &request.document_name,
        };

        let http_response = self
            .inner
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| askdoc_core::Error::from(Error::Reqwest(e)))?;

        let status_code = http_response.status().as_u16();
        let success = http_response.status().is_success();
        let elapsed = start.elapsed();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request.request_id,
            status_code,
            elapsed_ms = elapsed.as_millis(),
            "Question exchange completed"
        );

        let response = QueryResponse::new(request.request_id, status_code, started_at);
        if !success {
            // Rejected exchanges carry no structured error detail.
            return Ok(response);
        }

        let answer: AnswerBody = http_response
            .json()
            .await
            .map_err(|e| askdoc_core::Error::from(Error::Reqwest(e)))?;

        Ok(response.with_answer(answer.data))
    }

    async fn health_check(&self) -> askdoc_core::Result<ServiceHealth> {
        // The backend exposes no dedicated health route; the client is
        // stateless and healthy if it was created successfully.
        Ok(ServiceHealth::healthy())
    }
}
