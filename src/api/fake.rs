//! Scripted in-memory [`AnalyzerApi`] used by orchestration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sitescope_types::{AnalysisResult, HealthStatus, RecentSite, TracerouteHop, TracerouteResult};

use super::{AnalyzerApi, RequestError};

/// A recorded call against the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Analyze(String),
    ListRecent,
    CheckHealth,
    Traceroute(String),
}

/// Replays queued responses in order and records every call.
///
/// When a queue runs dry, `list_recent` and `check_health` succeed with an
/// empty list / `ok`, while `analyze` and `traceroute` fail.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    analyze: Mutex<VecDeque<Result<AnalysisResult, RequestError>>>,
    recent: Mutex<VecDeque<Result<Vec<RecentSite>, RequestError>>>,
    health: Mutex<VecDeque<Result<HealthStatus, RequestError>>>,
    traceroute: Mutex<VecDeque<Result<TracerouteResult, RequestError>>>,
    calls: Mutex<Vec<Call>>,
    health_delay: Option<Duration>,
    health_in_flight: AtomicUsize,
    health_max_in_flight: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every health check take `delay` (tokio time).
    pub fn with_health_delay(mut self, delay: Duration) -> Self {
        self.health_delay = Some(delay);
        self
    }

    pub fn push_analyze(&self, result: Result<AnalysisResult, RequestError>) {
        self.analyze.lock().push_back(result);
    }

    pub fn push_recent(&self, result: Result<Vec<RecentSite>, RequestError>) {
        self.recent.lock().push_back(result);
    }

    pub fn push_health(&self, result: Result<HealthStatus, RequestError>) {
        self.health.lock().push_back(result);
    }

    pub fn push_traceroute(&self, result: Result<TracerouteResult, RequestError>) {
        self.traceroute.lock().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn max_concurrent_health_checks(&self) -> usize {
        self.health_max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl AnalyzerApi for ScriptedApi {
    async fn analyze(&self, url: &str) -> Result<AnalysisResult, RequestError> {
        self.record(Call::Analyze(url.to_string()));
        let next = self.analyze.lock().pop_front();
        next.unwrap_or_else(|| Err(RequestError::Transport("no scripted response".to_string())))
    }

    async fn list_recent(&self) -> Result<Vec<RecentSite>, RequestError> {
        self.record(Call::ListRecent);
        let next = self.recent.lock().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn check_health(&self) -> Result<HealthStatus, RequestError> {
        self.record(Call::CheckHealth);
        let now = self.health_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.health_max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.health_delay {
            tokio::time::sleep(delay).await;
        }

        self.health_in_flight.fetch_sub(1, Ordering::SeqCst);
        let next = self.health.lock().pop_front();
        next.unwrap_or_else(|| Ok(healthy()))
    }

    async fn traceroute(&self, url: &str) -> Result<TracerouteResult, RequestError> {
        self.record(Call::Traceroute(url.to_string()));
        let next = self.traceroute.lock().pop_front();
        next.unwrap_or_else(|| Err(RequestError::Transport("no scripted response".to_string())))
    }

    fn description(&self) -> &str {
        "scripted"
    }
}

pub fn analysis(url: &str, load_time_ms: f64) -> AnalysisResult {
    AnalysisResult {
        url: url.to_string(),
        status_code: 200,
        load_time_ms,
        ..Default::default()
    }
}

pub fn recent(url: &str) -> RecentSite {
    RecentSite {
        url: url.to_string(),
        last_analyzed_at: "2024-05-01T12:00:00".to_string(),
        last_status_code: Some(200),
        last_load_time_ms: Some(100.0),
    }
}

pub fn trace(target: &str) -> TracerouteResult {
    TracerouteResult {
        target: target.to_string(),
        hops: vec![TracerouteHop::new(1, "10.0.0.1 2ms")],
        raw_output: "...".to_string(),
    }
}

pub fn healthy() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
    }
}

pub fn server_error(status: u16, body: &str) -> RequestError {
    RequestError::from_status(status, body)
}
