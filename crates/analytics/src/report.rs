use crate::metrics::{ParticipantDelta, QuarterExtremes};
use core_types::{DateRange, Period};
use serde::{Deserialize, Serialize};

/// The five metric families for one manager over one window.
///
/// Each family is `None` when the window's data does not support it; the
/// families are computed independently of each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManagerMetrics {
    pub cumulative_growth: Option<f64>,
    pub annualized_return: Option<f64>,
    pub extremes: Option<QuarterExtremes>,
    pub participants: Option<ParticipantDelta>,
    pub expense_ratio: Option<f64>,
}

/// The outcome for one manager of the selected fund type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerResult {
    pub manager: String,
    /// Span of the manager's full history in years.
    pub coverage_years: f64,
    /// Reports of this manager inside the resolved window.
    pub rows_in_window: usize,
    /// `None` when the manager is not eligible for the window.
    pub metrics: Option<ManagerMetrics>,
}

impl ManagerResult {
    pub fn is_eligible(&self) -> bool {
        self.metrics.is_some()
    }
}

/// Everything computed for one fund type and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    pub period: Period,
    /// `None` when the period could not be resolved to an interval.
    pub range: Option<DateRange>,
    /// The history length a manager needed to be eligible.
    pub requested_years: Option<f64>,
    /// One entry per manager of the fund type, in manager-name order.
    pub managers: Vec<ManagerResult>,
}

impl WindowReport {
    pub fn eligible(&self) -> impl Iterator<Item = &ManagerResult> {
        self.managers.iter().filter(|m| m.is_eligible())
    }
}
