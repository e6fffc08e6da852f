//! Traceroute results.

/// A single routing hop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracerouteHop {
    /// 1-based hop number.
    pub hop: u32,
    /// Unparsed detail text for the hop (address, timings).
    pub details: String,
}

impl TracerouteHop {
    pub fn new(hop: u32, details: impl Into<String>) -> Self {
        Self {
            hop,
            details: details.into(),
        }
    }
}

/// The outcome of a traceroute against a URL's host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TracerouteResult {
    pub target: String,
    pub hops: Vec<TracerouteHop>,
    /// The traceroute tool's output, verbatim.
    pub raw_output: String,
}

impl TracerouteResult {
    /// Returns true if no hops could be parsed from the raw output.
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}
