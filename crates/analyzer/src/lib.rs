//! # Pension Dashboard Analyzer
//!
//! Turns the analytics crate's `WindowReport` into what a screen shows: five
//! ranked tables of formatted text, the selector options, and a session that
//! owns the current selection.
//!
//! ## Public API
//!
//! - `Analyzer`: runs the analytics engine for a fund type and period and ranks
//!   the resulting rows.
//! - `MetricTables`: the formatted, ranked rows of the five metric families.
//! - `controls`: selector options and the rules that keep a selection valid.
//! - `DashboardSession` / `DashboardView`: the selection state and everything
//!   rendered from it.

pub mod controls;
pub mod format;
pub mod rank;
pub mod session;
pub mod tables;

pub use rank::{SortDirection, rank};
pub use session::{DashboardSession, DashboardView, PeriodOption, SectionLabels};
pub use tables::{
    AnnualizedRow, ExpenseRow, ExtremesRow, GrowthRow, MetricRow, MetricTables, ParticipantsRow,
};

use analytics::{AnalyticsEngine, CoverageEvaluator, WindowReport};
use configuration::DashboardConfig;
use core_types::{Period, Placeholders};
use dataset::Dataset;

/// The main analysis engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer {
    engine: AnalyticsEngine,
}

impl Analyzer {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            engine: AnalyticsEngine::new(CoverageEvaluator::new(config.coverage_epsilon)),
        }
    }

    /// Evaluates one fund type over one period. `ALL` is measured against the
    /// whole dataset's date range, not just the fund type's.
    pub fn analyze(&self, dataset: &Dataset, fund_type: &str, period: Period) -> WindowReport {
        let scope = dataset.for_fund_type(fund_type);
        self.engine.evaluate(&scope, dataset.global_range(), period)
    }

    /// Evaluates, formats and ranks the five tables for one selection.
    pub fn run(
        &self,
        dataset: &Dataset,
        fund_type: &str,
        period: Period,
        selected_manager: Option<&str>,
        placeholders: &dyn Placeholders,
    ) -> (WindowReport, MetricTables) {
        let report = self.analyze(dataset, fund_type, period);
        let tables = MetricTables::build(&report, selected_manager, placeholders);
        (report, tables)
    }
}
