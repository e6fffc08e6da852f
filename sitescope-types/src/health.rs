//! Service health payload.

/// Status string the service reports when it is healthy.
pub const HEALTHY_STATUS: &str = "ok";

/// Body of the `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Returns true if the service declared itself healthy.
    pub fn is_ok(&self) -> bool {
        self.status == HEALTHY_STATUS
    }
}
