//! # Pension Dashboard Analytics Engine
//!
//! This crate turns raw fund observations into the numbers the comparison
//! tables are built from. It is a pure logic crate: it depends only on
//! `core-types` and performs no I/O.
//!
//! ## Public API
//!
//! - `resolve_range`: maps a `Period` to a concrete inclusive date interval.
//! - `CoverageEvaluator`: decides whether a manager's history is long enough
//!   for the requested window.
//! - `metrics`: the five metric families (cumulative growth, annualized return,
//!   quarterly extremes, participant delta, expense ratio).
//! - `AnalyticsEngine`: runs all of the above for one fund type and period and
//!   produces a `WindowReport`.

// Declare the modules that constitute this crate.
pub mod coverage;
pub mod engine;
pub mod metrics;
pub mod range;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use coverage::{CoverageEvaluator, DEFAULT_EPSILON};
pub use engine::AnalyticsEngine;
pub use metrics::{ParticipantDelta, QuarterExtremes};
pub use range::resolve_range;
pub use report::{ManagerMetrics, ManagerResult, WindowReport};
