//! Derived data for display.
//!
//! This module turns raw service values into the figures the UI shows.
//!
//! ## Submodules
//!
//! - [`duration`]: Parsing of interval strings (e.g., "60s", "500ms") and load-time formatting
//! - [`history`]: Per-URL load-time history for sparklines and trend deltas
//! - [`load`]: Load-time speed buckets and the issue verdict
//! - [`timestamp`]: Parsing and local-time rendering of service timestamps

pub mod duration;
pub mod history;
pub mod load;
pub mod timestamp;

pub use history::LoadHistory;
pub use load::LoadSpeed;
