//! Load-time history for sparklines and trend indicators.

use std::collections::{HashMap, VecDeque};

use sitescope_types::AnalysisResult;

/// Maximum number of samples to keep per URL.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks the load time of every successful analysis in this session.
///
/// Samples are keyed by the analyzed URL so re-running a site builds up a
/// trend for it.
#[derive(Debug, Clone, Default)]
pub struct LoadHistory {
    samples: HashMap<String, VecDeque<f64>>,
}

impl LoadHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the load time of an analysis.
    pub fn record(&mut self, analysis: &AnalysisResult) {
        let samples = self.samples.entry(analysis.url.clone()).or_default();
        samples.push_back(analysis.load_time_ms.max(0.0));
        if samples.len() > MAX_HISTORY_SIZE {
            samples.pop_front();
        }
    }

    /// Number of samples recorded for a URL.
    pub fn len(&self, url: &str) -> usize {
        self.samples.get(url).map_or(0, VecDeque::len)
    }

    /// Get sparkline data (whole milliseconds) for a URL.
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self, url: &str) -> Vec<u64> {
        let Some(values) = self.samples.get(url) else {
            return Vec::new();
        };

        if values.len() < 2 {
            return Vec::new();
        }

        values.iter().map(|v| v.round() as u64).collect()
    }

    /// Change in load time versus the previous analysis of the same URL.
    ///
    /// Returns None if the URL was analyzed fewer than two times.
    pub fn delta(&self, url: &str) -> Option<f64> {
        let values = self.samples.get(url)?;
        if values.len() < 2 {
            return None;
        }

        let current = *values.back()?;
        let previous = *values.get(values.len() - 2)?;
        Some(current - previous)
    }
}
