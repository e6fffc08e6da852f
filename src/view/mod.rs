//! View models: owned UI state plus the transitions that change it.
//!
//! View models never perform I/O. A transition mutates the owned state and
//! returns an [`Effect`] describing the request to issue; the outcome comes
//! back later as a [`Completion`] and is applied by another transition.
//!
//! ```text
//! user action ──▶ transition ──▶ Effect ──▶ runner (tokio task)
//!                     ▲                          │
//!                     └──────── Completion ◀─────┘
//! ```
//!
//! ## Submodules
//!
//! - [`analysis`]: current analysis, loading flag, error, selected URL
//! - [`traceroute`]: on-demand traceroute with its own lifecycle
//! - [`recent`]: the recent-sites list and its cursor

pub mod analysis;
pub mod recent;
pub mod traceroute;

pub use analysis::{AnalysisPolicy, AnalysisViewModel};
pub use recent::RecentSites;
pub use traceroute::TracerouteViewModel;

use sitescope_types::{AnalysisResult, RecentSite, TracerouteResult};

use crate::api::RequestError;

/// Monotonically increasing tag attached to each analysis or traceroute call.
pub type RequestId = u64;

/// Why a recent-sites refresh was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOrigin {
    /// Initial load when the dashboard starts.
    Startup,
    /// Follow-up of a successful analysis.
    AfterAnalysis(RequestId),
}

/// A request that a transition asks the runner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Analyze { id: RequestId, url: String },
    ListRecent { origin: RefreshOrigin },
    Traceroute { id: RequestId, target: String },
}

/// The outcome of an [`Effect`], fed back into the dashboard.
#[derive(Debug, Clone)]
pub enum Completion {
    Analyzed {
        id: RequestId,
        result: Result<AnalysisResult, RequestError>,
    },
    RecentListed {
        origin: RefreshOrigin,
        result: Result<Vec<RecentSite>, RequestError>,
    },
    Traced {
        id: RequestId,
        result: Result<TracerouteResult, RequestError>,
    },
}

impl Completion {
    /// The failed completion for `effect`, used when its request could not
    /// produce one of its own.
    pub fn failed(effect: Effect, err: RequestError) -> Self {
        match effect {
            Effect::Analyze { id, .. } => Completion::Analyzed {
                id,
                result: Err(err),
            },
            Effect::ListRecent { origin } => Completion::RecentListed {
                origin,
                result: Err(err),
            },
            Effect::Traceroute { id, .. } => Completion::Traced {
                id,
                result: Err(err),
            },
        }
    }
}
