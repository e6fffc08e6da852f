//! The top-level view model.
//!
//! [`Dashboard`] owns every view model and is the only place where their
//! state changes. Cross-component rules live here: starting an analysis resets
//! the traceroute panel, a successful analysis refreshes the recent-sites list,
//! and picking a recent site re-runs an analysis.

use tracing::{debug, warn};

use crate::data::LoadHistory;
use crate::view::{
    AnalysisPolicy, AnalysisViewModel, Completion, Effect, RecentSites, RefreshOrigin,
    TracerouteViewModel,
};

/// State snapshot for the whole dashboard.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    analysis: AnalysisViewModel,
    traceroute: TracerouteViewModel,
    recent: RecentSites,
    history: LoadHistory,
}

impl Dashboard {
    pub fn new(policy: AnalysisPolicy) -> Self {
        Self {
            analysis: AnalysisViewModel::new(policy),
            ..Default::default()
        }
    }

    pub fn analysis(&self) -> &AnalysisViewModel {
        &self.analysis
    }

    pub fn traceroute(&self) -> &TracerouteViewModel {
        &self.traceroute
    }

    pub fn recent(&self) -> &RecentSites {
        &self.recent
    }

    /// Mutable access to the recent list, for cursor movement only.
    pub fn recent_mut(&mut self) -> &mut RecentSites {
        &mut self.recent
    }

    pub fn history(&self) -> &LoadHistory {
        &self.history
    }

    /// Initial recent-sites load. Best-effort, and independent of the
    /// analysis loading flag.
    pub fn start(&self) -> Effect {
        Effect::ListRecent {
            origin: RefreshOrigin::Startup,
        }
    }

    /// Start analyzing `url`.
    ///
    /// Clears the traceroute panel so it never shows data for a previous URL.
    pub fn run_analysis(&mut self, url: impl Into<String>) -> Effect {
        self.traceroute.reset();
        self.analysis.begin(url)
    }

    /// Re-run an analysis for a site picked from the recent list.
    ///
    /// Pure forwarding: no deduplication, errors surface through the analysis
    /// error channel.
    pub fn select_recent(&mut self, url: &str) -> Effect {
        self.run_analysis(url)
    }

    /// The URL a traceroute would target right now.
    ///
    /// The analyzed URL wins over the selected one.
    pub fn traceroute_target(&self) -> &str {
        match self.analysis.current() {
            Some(current) => &current.url,
            None => self.analysis.selected_url(),
        }
    }

    /// Start a traceroute against the current target.
    ///
    /// Returns None (and sets the traceroute error) if there is no target.
    pub fn run_traceroute(&mut self) -> Option<Effect> {
        let target = self.traceroute_target().to_string();
        self.traceroute.begin(&target).ok()
    }

    /// Apply a completed request and return any follow-up effect.
    pub fn apply(&mut self, completion: Completion) -> Option<Effect> {
        match completion {
            Completion::Analyzed { id, result } => {
                // Only results that will be shown count towards the trend.
                if let Ok(ref analysis) = result {
                    if !self.analysis.is_superseded(id) {
                        self.history.record(analysis);
                    }
                }
                self.analysis.complete(id, result)
            }
            Completion::RecentListed { origin, result } => {
                match result {
                    Ok(sites) => {
                        debug!("recent sites refreshed ({} entries)", sites.len());
                        self.recent.replace(sites);
                    }
                    Err(err) => warn!("Failed to load recent sites: {}", err),
                }
                if let RefreshOrigin::AfterAnalysis(id) = origin {
                    self.analysis.finish_refresh(id);
                }
                None
            }
            Completion::Traced { id, result } => {
                self.traceroute.complete(id, result);
                None
            }
        }
    }
}
