//! # sitescope-types
//!
//! Wire types for the website analysis API consumed by sitescope. Every type
//! here is an immutable value snapshot produced by the analysis service; the
//! dashboard never constructs them itself outside of tests.
//!
//! ## Features
//!
//! - `serde`: JSON (de)serialization matching the service's snake_case schema
//!
//! ## Example
//!
//! ```rust
//! use sitescope_types::{TracerouteHop, TracerouteResult};
//!
//! let trace = TracerouteResult {
//!     target: "https://a.com".to_string(),
//!     hops: vec![TracerouteHop::new(1, "10.0.0.1 2ms")],
//!     raw_output: String::new(),
//! };
//!
//! assert_eq!(trace.hops.len(), 1);
//! assert!(!trace.is_empty());
//! ```

mod analysis;
mod health;
mod recent;
mod request;
mod traceroute;

pub use analysis::*;
pub use health::*;
pub use recent::*;
pub use request::*;
pub use traceroute::*;
