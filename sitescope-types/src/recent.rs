//! Recently analyzed sites.

/// One entry of the service's "recent sites" list.
///
/// The `url` is the unique key within a list. The timestamp is kept as the
/// raw string the service sent, since it may or may not carry an offset.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentSite {
    pub url: String,
    pub last_analyzed_at: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_status_code: Option<u16>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_load_time_ms: Option<f64>,
}
