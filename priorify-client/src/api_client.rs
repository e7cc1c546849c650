//! Priorify backend client
//!
//! Reads and writes the ranked priority lists through the backend's
//! `/api/priorities/{high,low}` endpoints. Response bodies of writes are not
//! interpreted; any 2xx status is success.

use std::time::Duration;

use async_trait::async_trait;
use priorify_common::api::{priorities_path, PrioritySubmission, StoredPriority};
use priorify_common::config::ClientConfig;
use priorify_common::Priority;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use thiserror::Error;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("priorify/", env!("CARGO_PKG_VERSION"));

/// Backend client errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("API error {0}: {1}")]
    Status(u16, String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// HTTP client could not be constructed
    #[error("Client setup error: {0}")]
    Setup(String),
}

/// Ranked lists as currently stored by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredPriorities {
    pub high: Vec<StoredPriority>,
    pub low: Vec<StoredPriority>,
}

/// Backend operations used by the priority screen
#[async_trait]
pub trait PriorityApi: Send + Sync {
    /// Persist both ranked lists
    async fn save_priorities(&self, submission: &PrioritySubmission) -> Result<(), ApiError>;

    /// Fetch both ranked lists
    async fn load_priorities(&self) -> Result<StoredPriorities, ApiError>;
}

/// reqwest implementation of [`PriorityApi`]
pub struct HttpPriorityApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpPriorityApi {
    /// Create client from resolved configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_settings(&config.api_url, config.api_token.as_deref(), config.request_timeout)
    }

    pub fn with_settings(
        base_url: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Setup(format!("invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: &str) -> String {
        format!("{}{}", self.base_url, priorities_path(kind))
    }

    async fn post_list(&self, kind: &str, list: &[Priority]) -> Result<(), ApiError> {
        let url = self.url(kind);
        debug!(url = %url, count = list.len(), "Posting priority list");

        let response = self
            .http_client
            .post(&url)
            .json(list)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), error_text));
        }

        Ok(())
    }

    async fn get_list(&self, kind: &str) -> Result<Vec<StoredPriority>, ApiError> {
        let url = self.url(kind);
        debug!(url = %url, "Fetching priority list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), error_text));
        }

        response
            .json::<Vec<StoredPriority>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PriorityApi for HttpPriorityApi {
    async fn save_priorities(&self, submission: &PrioritySubmission) -> Result<(), ApiError> {
        tokio::try_join!(
            self.post_list("high", &submission.high_priorities),
            self.post_list("low", &submission.low_priorities),
        )?;

        info!(
            high = submission.high_priorities.len(),
            low = submission.low_priorities.len(),
            "Priorities saved"
        );
        Ok(())
    }

    async fn load_priorities(&self) -> Result<StoredPriorities, ApiError> {
        let (high, low) = tokio::try_join!(self.get_list("high"), self.get_list("low"))?;

        info!(high = high.len(), low = low.len(), "Priorities loaded");
        Ok(StoredPriorities { high, low })
    }
}
