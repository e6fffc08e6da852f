//! HTTP implementation of [`AnalyzerApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use sitescope_types::{AnalysisResult, HealthStatus, RecentSite, TracerouteResult, UrlRequest};
use tracing::debug;

use super::{AnalyzerApi, RequestError};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Talks JSON over HTTP to the analysis service.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    description: String,
}

impl HttpGateway {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> HttpGatewayBuilder {
        HttpGatewayBuilder::default()
    }

    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        debug!("GET {}", path);
        let response = self.client.get(self.endpoint(path)).send().await?;
        handle_response(response).await
    }

    async fn post_url<T: DeserializeOwned>(&self, path: &str, url: &str) -> Result<T, RequestError> {
        debug!("POST {} url={}", path, url);
        let response = self
            .client
            .post(self.endpoint(path))
            .json(&UrlRequest::new(url))
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Shared response rule for every operation.
///
/// Non-2xx bodies become the error message verbatim; 2xx bodies are decoded
/// as `T` without further validation.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!("request failed with status {}", status);
        return Err(RequestError::from_status(status.as_u16(), &body));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl AnalyzerApi for HttpGateway {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, RequestError> {
        self.post_url("/analyze", url).await
    }

    async fn list_recent(&self) -> Result<Vec<RecentSite>, RequestError> {
        self.get_json("/recent").await
    }

    async fn check_health(&self) -> Result<HealthStatus, RequestError> {
        self.get_json("/health").await
    }

    async fn traceroute(&self, url: &str) -> Result<TracerouteResult, RequestError> {
        self.post_url("/traceroute", url).await
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpGateway`].
#[derive(Debug, Default)]
pub struct HttpGatewayBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpGatewayBuilder {
    /// Set the service base URL (default: `http://localhost:8000`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set a per-request timeout. Without one, the transport defaults apply.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<HttpGateway, RequestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("api: {}", base_url);

        Ok(HttpGateway {
            client,
            base_url,
            description,
        })
    }
}
