//! Executes effects against the analysis service.
//!
//! Each [`Effect`] runs on its own tokio task and reports back through an
//! unbounded channel. Completions are only ever applied by the owner of the
//! [`Controller`], so the dashboard state has a single writer.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::api::{AnalyzerApi, RequestError};
use crate::dashboard::Dashboard;
use crate::view::{AnalysisPolicy, Completion, Effect};

/// Perform one effect and wrap the outcome.
pub async fn execute(api: &dyn AnalyzerApi, effect: Effect) -> Completion {
    match effect {
        Effect::Analyze { id, url } => Completion::Analyzed {
            id,
            result: api.analyze(&url).await,
        },
        Effect::ListRecent { origin } => Completion::RecentListed {
            origin,
            result: api.list_recent().await,
        },
        Effect::Traceroute { id, target } => Completion::Traced {
            id,
            result: api.traceroute(&target).await,
        },
    }
}

/// Spawns effects as background tasks and collects their completions.
#[derive(Debug)]
pub struct EffectRunner {
    api: Arc<dyn AnalyzerApi>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn AnalyzerApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn api(&self) -> &Arc<dyn AnalyzerApi> {
        &self.api
    }

    /// Number of effects whose completion has not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run `effect` in the background. Must be called within a tokio runtime.
    pub fn spawn(&mut self, effect: Effect) {
        debug!("spawning {:?}", effect);
        self.in_flight += 1;

        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The request runs in its own task so a panic still yields a
            // completion and `in_flight` drains.
            let fallback = effect.clone();
            let request = tokio::spawn(async move { execute(api.as_ref(), effect).await });
            let completion = match request.await {
                Ok(completion) => completion,
                Err(err) => {
                    error!("request task failed: {}", err);
                    Completion::failed(
                        fallback,
                        RequestError::Transport(format!("Request task failed: {}", err)),
                    )
                }
            };
            // Receiver dropped means the dashboard is gone
            let _ = tx.send(completion);
        });
    }

    /// Take a finished completion without blocking.
    pub fn try_next(&mut self) -> Option<Completion> {
        match self.rx.try_recv() {
            Ok(completion) => {
                self.in_flight -= 1;
                Some(completion)
            }
            Err(_) => None,
        }
    }

    /// Wait for the next completion. Returns None when nothing is in flight.
    pub async fn next(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(completion)
    }
}

/// A [`Dashboard`] wired to an [`EffectRunner`].
///
/// User actions go through the controller, which updates the dashboard and
/// spawns whatever requests the transition asked for. Follow-up effects
/// (the recent-sites refresh after an analysis) are spawned as completions
/// are applied.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sitescope::{Controller, HttpGateway};
/// use sitescope::view::AnalysisPolicy;
///
/// # tokio_test::block_on(async {
/// let gateway = HttpGateway::builder().build().unwrap();
/// let mut controller = Controller::new(Arc::new(gateway), AnalysisPolicy::default());
///
/// controller.run_analysis("https://example.com");
/// controller.settle().await;
///
/// if let Some(result) = controller.dashboard().analysis().current() {
///     println!("status {}", result.status_code);
/// }
/// # });
/// ```
#[derive(Debug)]
pub struct Controller {
    dashboard: Dashboard,
    runner: EffectRunner,
}

impl Controller {
    pub fn new(api: Arc<dyn AnalyzerApi>, policy: AnalysisPolicy) -> Self {
        Self {
            dashboard: Dashboard::new(policy),
            runner: EffectRunner::new(api),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    /// Description of the backend the controller talks to.
    pub fn backend(&self) -> &str {
        self.runner.api().description()
    }

    /// Whether any request is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.runner.in_flight() > 0
    }

    /// Issue the initial recent-sites load.
    pub fn start(&mut self) {
        let effect = self.dashboard.start();
        self.runner.spawn(effect);
    }

    pub fn run_analysis(&mut self, url: impl Into<String>) {
        let effect = self.dashboard.run_analysis(url);
        self.runner.spawn(effect);
    }

    /// Forward a recent-site selection as a new analysis run.
    pub fn select_recent(&mut self, url: &str) {
        let effect = self.dashboard.select_recent(url);
        self.runner.spawn(effect);
    }

    /// Start a traceroute. Returns false if there was no target.
    pub fn run_traceroute(&mut self) -> bool {
        match self.dashboard.run_traceroute() {
            Some(effect) => {
                self.runner.spawn(effect);
                true
            }
            None => false,
        }
    }

    /// Apply every completion that is already available.
    ///
    /// Returns the number of completions applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.runner.try_next() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait until every outstanding request, including follow-ups, has been
    /// applied.
    pub async fn settle(&mut self) {
        while let Some(completion) = self.runner.next().await {
            self.apply(completion);
        }
    }

    fn apply(&mut self, completion: Completion) {
        if let Some(follow_up) = self.dashboard.apply(completion) {
            self.runner.spawn(follow_up);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{analysis, recent, server_error, trace, Call, ScriptedApi};
    use crate::view::RefreshOrigin;
    use async_trait::async_trait;
    use sitescope_types::{AnalysisResult, HealthStatus, RecentSite, TracerouteResult};

    /// Analyze panics; everything else behaves.
    #[derive(Debug)]
    struct PanickingApi;

    #[async_trait]
    impl AnalyzerApi for PanickingApi {
        async fn analyze(&self, _url: &str) -> Result<AnalysisResult, RequestError> {
            panic!("analyzer blew up");
        }

        async fn list_recent(&self) -> Result<Vec<RecentSite>, RequestError> {
            Ok(Vec::new())
        }

        async fn check_health(&self) -> Result<HealthStatus, RequestError> {
            Ok(crate::api::fake::healthy())
        }

        async fn traceroute(&self, _url: &str) -> Result<TracerouteResult, RequestError> {
            Err(RequestError::Transport("unused".to_string()))
        }

        fn description(&self) -> &str {
            "panicking"
        }
    }

    fn controller(api: &Arc<ScriptedApi>) -> Controller {
        Controller::new(api.clone(), AnalysisPolicy::default())
    }

    #[tokio::test]
    async fn test_successful_analysis_refreshes_recent_once() {
        let api = Arc::new(ScriptedApi::new());
        api.push_analyze(Ok(analysis("https://example.com", 812.4)));
        api.push_recent(Ok(vec![recent("https://example.com")]));

        let mut controller = controller(&api);
        controller.run_analysis("https://example.com");
        assert!(controller.dashboard().analysis().is_loading());
        controller.settle().await;

        let dashboard = controller.dashboard();
        assert_eq!(dashboard.analysis().current().unwrap().load_time_ms, 812.4);
        assert!(!dashboard.analysis().is_loading());
        assert_eq!(dashboard.recent().len(), 1);
        assert_eq!(
            api.calls(),
            vec![Call::Analyze("https://example.com".to_string()), Call::ListRecent]
        );
    }

    #[tokio::test]
    async fn test_failed_analysis_does_not_refresh_recent() {
        let api = Arc::new(ScriptedApi::new());
        api.push_analyze(Err(server_error(400, "invalid url")));

        let mut controller = controller(&api);
        controller.run_analysis("https://bad.example");
        controller.settle().await;

        assert_eq!(
            controller.dashboard().analysis().error_message(),
            Some("invalid url")
        );
        assert_eq!(api.count(|c| *c == Call::ListRecent), 0);
    }

    #[tokio::test]
    async fn test_start_loads_recent_sites() {
        let api = Arc::new(ScriptedApi::new());
        api.push_recent(Ok(vec![recent("https://a.com"), recent("https://b.com")]));

        let mut controller = controller(&api);
        controller.start();
        controller.settle().await;

        assert_eq!(controller.dashboard().recent().len(), 2);
        assert!(!controller.dashboard().analysis().is_loading());
    }

    #[tokio::test]
    async fn test_select_recent_twice_issues_two_analyses() {
        let api = Arc::new(ScriptedApi::new());
        api.push_analyze(Ok(analysis("https://a.com", 10.0)));
        api.push_analyze(Ok(analysis("https://a.com", 12.0)));

        let mut controller = controller(&api);
        controller.select_recent("https://a.com");
        controller.select_recent("https://a.com");
        controller.settle().await;

        assert_eq!(
            api.count(|c| *c == Call::Analyze("https://a.com".to_string())),
            2
        );
        assert_eq!(api.count(|c| *c == Call::ListRecent), 2);
        assert!(!controller.dashboard().analysis().is_loading());
    }

    #[tokio::test]
    async fn test_traceroute_without_target_issues_no_request() {
        let api = Arc::new(ScriptedApi::new());
        let mut controller = controller(&api);

        assert!(!controller.run_traceroute());
        controller.settle().await;

        assert!(api.calls().is_empty());
        assert!(controller.dashboard().traceroute().error_message().is_some());
    }

    #[tokio::test]
    async fn test_traceroute_uses_analyzed_url() {
        let api = Arc::new(ScriptedApi::new());
        api.push_analyze(Ok(analysis("https://www.a.com/", 10.0)));
        api.push_traceroute(Ok(trace("https://www.a.com/")));

        let mut controller = controller(&api);
        controller.run_analysis("https://a.com");
        controller.settle().await;

        assert!(controller.run_traceroute());
        controller.settle().await;

        assert!(api
            .calls()
            .contains(&Call::Traceroute("https://www.a.com/".to_string())));
        assert!(controller.dashboard().traceroute().result().is_some());
        assert!(!controller.dashboard().traceroute().is_loading());
    }

    #[tokio::test]
    async fn test_pump_applies_available_completions() {
        let api = Arc::new(ScriptedApi::new());
        api.push_recent(Ok(vec![recent("https://a.com")]));

        let mut controller = controller(&api);
        controller.start();
        assert!(controller.is_busy());

        // Let the spawned task run
        while controller.pump() == 0 {
            tokio::task::yield_now().await;
        }

        assert!(!controller.is_busy());
        assert_eq!(controller.dashboard().recent().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_maps_effects_to_calls() {
        let api = ScriptedApi::new();
        api.push_traceroute(Ok(trace("https://a.com")));

        let completion = execute(
            &api,
            Effect::Traceroute {
                id: 7,
                target: "https://a.com".to_string(),
            },
        )
        .await;

        assert!(matches!(completion, Completion::Traced { id: 7, result: Ok(_) }));
        assert_eq!(api.calls(), vec![Call::Traceroute("https://a.com".to_string())]);
    }

    #[tokio::test]
    async fn test_panicking_request_settles_as_error() {
        let mut controller = Controller::new(Arc::new(PanickingApi), AnalysisPolicy::default());
        controller.run_analysis("https://a.com");

        tokio::time::timeout(std::time::Duration::from_secs(5), controller.settle())
            .await
            .expect("settle must not hang");

        let analysis = controller.dashboard().analysis();
        assert!(!controller.is_busy());
        assert!(!analysis.is_loading());
        assert!(analysis
            .error_message()
            .unwrap()
            .starts_with("Request task failed"));
    }

    #[test]
    fn test_failed_completion_keeps_request_identity() {
        let err = RequestError::Transport("boom".to_string());
        let completion = Completion::failed(
            Effect::ListRecent {
                origin: RefreshOrigin::AfterAnalysis(3),
            },
            err,
        );

        assert!(matches!(
            completion,
            Completion::RecentListed {
                origin: RefreshOrigin::AfterAnalysis(3),
                result: Err(_)
            }
        ));
    }
}
