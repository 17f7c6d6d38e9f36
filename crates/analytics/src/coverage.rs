use core_types::{DateRange, Observation, Period, years_between};
use std::collections::BTreeMap;

/// Default tolerance for floating-point misses at the coverage boundary.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Span of a manager's history in years (first to last report).
/// Zero for an empty history.
pub fn coverage_years(history: &[&Observation]) -> f64 {
    let first = history.iter().map(|o| o.report_date).min();
    let last = history.iter().map(|o| o.report_date).max();
    match (first, last) {
        (Some(first), Some(last)) => years_between(first, last),
        _ => 0.0,
    }
}

/// Coverage of every manager in `scope`, measured over the manager's whole
/// history in that scope rather than the requested window.
pub fn coverage_by_manager(scope: &[&Observation]) -> BTreeMap<String, f64> {
    let mut histories: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for &observation in scope {
        histories
            .entry(observation.manager.as_str())
            .or_default()
            .push(observation);
    }
    histories
        .into_iter()
        .map(|(manager, history)| (manager.to_string(), coverage_years(&history)))
        .collect()
}

/// How many years of history a manager needs for the period to be ranked.
///
/// `Trailing(n)` needs `n`; `All` needs the full resolved interval; `YearToDate`
/// has no requirement.
pub fn requested_years(period: Period, range: Option<DateRange>) -> Option<f64> {
    match period {
        Period::YearToDate => None,
        Period::Trailing(years) => Some(f64::from(years)),
        Period::All => range.map(|r| r.span_years()),
    }
}

/// Decides which managers are ranked for a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageEvaluator {
    epsilon: f64,
}

impl Default for CoverageEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl CoverageEvaluator {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Whether the coverage satisfies the requested length on its own.
    pub fn covers(&self, coverage_years: f64, requested_years: Option<f64>) -> bool {
        requested_years.is_none_or(|requested| coverage_years + self.epsilon >= requested)
    }

    /// Full eligibility: at least one report inside the window and enough
    /// history to cover the requested length.
    pub fn is_eligible(
        &self,
        coverage_years: f64,
        requested_years: Option<f64>,
        rows_in_window: usize,
    ) -> bool {
        rows_in_window > 0 && self.covers(coverage_years, requested_years)
    }
}
