use crate::coverage::{CoverageEvaluator, coverage_by_manager, requested_years};
use crate::metrics;
use crate::range::resolve_range;
use crate::report::{ManagerMetrics, ManagerResult, WindowReport};
use core_types::{DateRange, Observation, Period};
use std::collections::BTreeMap;

/// A stateless calculator for deriving the dashboard metrics from observations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {
    coverage: CoverageEvaluator,
}

impl AnalyticsEngine {
    pub fn new(coverage: CoverageEvaluator) -> Self {
        Self { coverage }
    }

    /// The main entry point for calculating one fund type's metrics.
    ///
    /// # Arguments
    ///
    /// * `scope` - Every observation of the selected fund type.
    /// * `global` - First and last report date of the whole dataset.
    /// * `period` - The selected lookback window.
    ///
    /// # Returns
    ///
    /// A `WindowReport` with one entry per manager of the fund type. Managers
    /// without a report inside the window, or whose history is shorter than
    /// the window requires, carry no metrics.
    pub fn evaluate(
        &self,
        scope: &[&Observation],
        global: Option<DateRange>,
        period: Period,
    ) -> WindowReport {
        let range = resolve_range(scope, global, period);
        let requested = requested_years(period, range);
        let coverage = coverage_by_manager(scope);

        let mut windows: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
        if let Some(range) = range {
            for observation in scope.iter().copied().filter(|o| range.contains(o.report_date)) {
                windows
                    .entry(observation.manager.as_str())
                    .or_default()
                    .push(observation);
            }
        }

        let managers = coverage
            .into_iter()
            .map(|(manager, coverage_years)| {
                let window = windows.remove(manager.as_str()).unwrap_or_default();
                let eligible = self
                    .coverage
                    .is_eligible(coverage_years, requested, window.len());
                ManagerResult {
                    metrics: eligible.then(|| self.calculate(&window)),
                    rows_in_window: window.len(),
                    manager,
                    coverage_years,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            %period,
            ?range,
            ?requested,
            managers = managers.len(),
            eligible = managers.iter().filter(|m| m.is_eligible()).count(),
            "Evaluated window."
        );

        WindowReport {
            period,
            range,
            requested_years: requested,
            managers,
        }
    }

    /// Computes every metric family over one manager's observations in the window.
    pub fn calculate(&self, window: &[&Observation]) -> ManagerMetrics {
        let mut sorted = window.to_vec();
        sorted.sort_by_key(|o| o.report_date);

        let changes: Vec<Option<f64>> = sorted.iter().map(|o| o.relative_change).collect();
        let first = sorted.first();
        let last = sorted.last();

        ManagerMetrics {
            cumulative_growth: metrics::geometric_cumulative_growth(&changes),
            annualized_return: metrics::annualized_return(&changes),
            extremes: metrics::quarterly_extremes(&changes),
            participants: metrics::participant_delta(
                first.and_then(|o| o.participant_count),
                last.and_then(|o| o.participant_count),
            ),
            expense_ratio: metrics::expense_ratio(last.and_then(|o| o.expense_ratio_pct)),
        }
    }
}
