//! # sitescope
//!
//! A terminal dashboard and library for website analysis.
//!
//! sitescope talks to a website-analysis service that reports HTTP status,
//! load time, SEO tags, issues and AI feedback for a URL, keeps a list of
//! recently analyzed sites, answers health checks and runs traceroutes. This
//! crate is the client side: it coordinates those requests, owns the state
//! derived from them and renders it in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │  app    │───▶│ dashboard │───▶│    ui    │───▶│ Terminal│  │
//! │  │ (input) │    │  (state)  │    │(rendering)    │         │  │
//! │  └────┬────┘    └─────▲─────┘    └──────────┘    └─────────┘  │
//! │       │  Effect       │ Completion                            │
//! │       ▼               │                                       │
//! │  ┌─────────┐    ┌─────┴─────┐         ┌────────┐              │
//! │  │ runner  │───▶│   api     │◀────────│ health │ (60s poll)   │
//! │  │ (tasks) │    │ (gateway) │         └────────┘              │
//! │  └─────────┘    └───────────┘                                 │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: The [`AnalyzerApi`] trait and its HTTP implementation, [`HttpGateway`]
//! - **[`view`]**: View models for the analysis, traceroute and recent-sites panes. Transitions
//!   are pure and return the [`view::Effect`] to run
//! - **[`dashboard`]**: [`Dashboard`], the single owner of all view-model state and the
//!   cross-pane rules
//! - **[`runner`]**: Runs effects on tokio tasks and feeds completions back; [`Controller`]
//!   ties it to a dashboard
//! - **[`health`]**: [`HealthMonitor`], the background health poll
//! - **[`data`]**: Load-time classification, durations, timestamps and session history
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard against a local service
//! sitescope --base-url http://localhost:8000
//!
//! # Analyze one URL and print the result as JSON
//! sitescope --once https://example.com --output result.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use sitescope::{Controller, HttpGateway};
//! use sitescope::view::AnalysisPolicy;
//!
//! # tokio_test::block_on(async {
//! let gateway = HttpGateway::builder()
//!     .base_url("http://localhost:8000")
//!     .build()
//!     .unwrap();
//!
//! let mut controller = Controller::new(Arc::new(gateway), AnalysisPolicy::LatestOnly);
//! controller.run_analysis("https://example.com");
//! controller.settle().await;
//!
//! let dashboard = controller.dashboard();
//! for site in dashboard.recent().sites() {
//!     println!("{}", site.url);
//! }
//! # });
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod events;
pub mod health;
pub mod input;
pub mod runner;
pub mod ui;
pub mod view;

// Re-export main types for convenience
pub use api::{AnalyzerApi, HttpGateway, HttpGatewayBuilder, RequestError};
pub use app::App;
pub use config::Settings;
pub use dashboard::Dashboard;
pub use health::{HealthMonitor, HealthSignal, MonitorState};
pub use input::ValidationError;
pub use runner::{Controller, EffectRunner};
pub use sitescope_types::{AnalysisResult, HealthStatus, RecentSite, TracerouteHop, TracerouteResult};
