//! Load-time classification.

/// Upper bound (inclusive) of a fast page load.
pub const FAST_MAX_MS: f64 = 500.0;
/// Upper bound (inclusive) of a moderate page load.
pub const MODERATE_MAX_MS: f64 = 1500.0;

/// Coarse speed bucket for a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSpeed {
    Fast,
    Moderate,
    Slow,
}

impl LoadSpeed {
    /// Classify a load time in milliseconds.
    pub fn classify(load_time_ms: f64) -> Self {
        if load_time_ms <= FAST_MAX_MS {
            LoadSpeed::Fast
        } else if load_time_ms <= MODERATE_MAX_MS {
            LoadSpeed::Moderate
        } else {
            LoadSpeed::Slow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadSpeed::Fast => "Fast (<500ms)",
            LoadSpeed::Moderate => "Moderate (500-1500ms)",
            LoadSpeed::Slow => "Slow (>1500ms)",
        }
    }
}

/// Verdict shown next to the issue count.
pub fn issue_verdict(issue_count: usize) -> &'static str {
    if issue_count > 0 {
        "Needs attention"
    } else {
        "Looks good"
    }
}
