//! Gateway to the remote analysis service.
//!
//! This module provides a trait-based abstraction over the four remote
//! operations the dashboard depends on, plus the HTTP implementation used in
//! production.

mod client;
mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpGateway, HttpGatewayBuilder, DEFAULT_BASE_URL};
pub use error::RequestError;

use std::fmt::Debug;

use async_trait::async_trait;
use sitescope_types::{AnalysisResult, HealthStatus, RecentSite, TracerouteResult};

/// The request/response contract of the analysis service.
///
/// Every operation either returns the parsed body or a [`RequestError`] whose
/// message is ready to show to the user. Implementations must not validate
/// the URL themselves; that happens before a request is ever issued.
///
/// # Example
///
/// ```no_run
/// use sitescope::{AnalyzerApi, HttpGateway};
///
/// # tokio_test::block_on(async {
/// let gateway = HttpGateway::builder()
///     .base_url("http://localhost:8000")
///     .build()
///     .unwrap();
///
/// let result = gateway.analyze("https://example.com").await.unwrap();
/// println!("{} loaded in {:.0} ms", result.url, result.load_time_ms);
/// # });
/// ```
#[async_trait]
pub trait AnalyzerApi: Send + Sync + Debug {
    /// Analyze a URL (`POST /analyze`).
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, RequestError>;

    /// List recently analyzed sites (`GET /recent`).
    async fn list_recent(&self) -> Result<Vec<RecentSite>, RequestError>;

    /// Query service health (`GET /health`).
    async fn check_health(&self) -> Result<HealthStatus, RequestError>;

    /// Trace the route to a URL's host (`POST /traceroute`).
    async fn traceroute(&self, url: &str) -> Result<TracerouteResult, RequestError>;

    /// Returns a human-readable description of the backend.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
