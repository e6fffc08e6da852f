//! The analysis view model.

use serde::Deserialize;
use sitescope_types::AnalysisResult;
use tracing::debug;

use super::{Effect, RefreshOrigin, RequestId};
use crate::api::RequestError;

/// How completions of overlapping analysis calls are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisPolicy {
    /// Every completion is applied in arrival order; the last one to finish
    /// decides what is shown.
    #[default]
    LastWriteWins,
    /// Completions from calls superseded by a newer `run_analysis` are
    /// discarded.
    LatestOnly,
}

/// State for the main analysis area.
#[derive(Debug, Clone, Default)]
pub struct AnalysisViewModel {
    current: Option<AnalysisResult>,
    is_loading: bool,
    error_message: Option<String>,
    selected_url: String,
    policy: AnalysisPolicy,
    next_id: RequestId,
    latest_id: Option<RequestId>,
}

impl AnalysisViewModel {
    pub fn new(policy: AnalysisPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// The analysis currently on display, if any.
    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The URL of the most recently started analysis.
    pub fn selected_url(&self) -> &str {
        &self.selected_url
    }

    pub fn policy(&self) -> AnalysisPolicy {
        self.policy
    }

    /// Start an analysis of `url`.
    ///
    /// Marks the model as loading, clears any error and records the URL as
    /// selected. The previous result stays visible until a new one arrives.
    pub fn begin(&mut self, url: impl Into<String>) -> Effect {
        let url = url.into();
        let id = self.next_id;
        self.next_id += 1;

        self.is_loading = true;
        self.error_message = None;
        self.selected_url = url.clone();
        self.latest_id = Some(id);

        Effect::Analyze { id, url }
    }

    /// Apply the outcome of an analyze request.
    ///
    /// On success the result replaces the current one and a recent-sites
    /// refresh is requested; loading stays on until that refresh settles.
    /// On failure the previous result is kept and the error is shown.
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<AnalysisResult, RequestError>,
    ) -> Option<Effect> {
        if self.is_superseded(id) {
            debug!("discarding superseded analysis #{}", id);
            return None;
        }

        match result {
            Ok(analysis) => {
                self.current = Some(analysis);
                Some(Effect::ListRecent {
                    origin: RefreshOrigin::AfterAnalysis(id),
                })
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                self.is_loading = false;
                None
            }
        }
    }

    /// The recent-sites refresh that followed analysis `id` has settled.
    pub fn finish_refresh(&mut self, id: RequestId) {
        if self.is_superseded(id) {
            return;
        }
        self.is_loading = false;
    }

    /// True if a completion for `id` would be discarded under the current
    /// policy.
    pub fn is_superseded(&self, id: RequestId) -> bool {
        self.policy == AnalysisPolicy::LatestOnly && self.latest_id != Some(id)
    }
}
