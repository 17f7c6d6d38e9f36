use crate::format::{fmt_count_change, fmt_fixed, fmt_signed};
use crate::rank::{SortDirection, rank};
use analytics::{ManagerMetrics, ManagerResult, WindowReport};
use core_types::Placeholders;
use serde::Serialize;

/// Uniform access to a formatted row, for renderers that do not care which
/// metric family they are drawing.
pub trait MetricRow {
    fn manager(&self) -> &str;
    /// The formatted value columns, in display order, without the manager.
    fn cells(&self) -> Vec<&str>;
    fn highlighted(&self) -> bool;
}

macro_rules! metric_row {
    ($name:ident { $($field:ident),+ }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        pub struct $name {
            pub manager: String,
            $(pub $field: String,)+
            pub highlighted: bool,
        }

        impl MetricRow for $name {
            fn manager(&self) -> &str {
                &self.manager
            }

            fn cells(&self) -> Vec<&str> {
                vec![$(self.$field.as_str()),+]
            }

            fn highlighted(&self) -> bool {
                self.highlighted
            }
        }
    };
}

metric_row!(GrowthRow { cumulative_growth });
metric_row!(AnnualizedRow { avg_yearly_return });
metric_row!(ExtremesRow { worst_quarter, best_quarter });
metric_row!(ParticipantsRow { participants_latest, participants_change });
metric_row!(ExpenseRow { expense_ratio });

/// The five ranked tables of one window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricTables {
    pub growth: Vec<GrowthRow>,
    pub annualized: Vec<AnnualizedRow>,
    pub extremes: Vec<ExtremesRow>,
    pub participants: Vec<ParticipantsRow>,
    pub expenses: Vec<ExpenseRow>,
}

/// Builds one family's rows: eligible managers through `present`, the rest
/// through `absent`, then ranks them.
fn family<R>(
    report: &WindowReport,
    direction: SortDirection,
    present: impl Fn(&ManagerResult, &ManagerMetrics) -> (Option<f64>, R),
    absent: impl Fn(&ManagerResult) -> R,
) -> Vec<R> {
    let mut eligible = Vec::new();
    let mut ineligible = Vec::new();
    for result in &report.managers {
        match &result.metrics {
            Some(metrics) => eligible.push(present(result, metrics)),
            None => ineligible.push(absent(result)),
        }
    }
    rank(eligible, ineligible, direction)
}

impl MetricTables {
    /// Formats and ranks every metric family of `report`.
    ///
    /// Ineligible managers get the "fund did not exist" placeholder in every
    /// column; eligible managers without participant or expense data get
    /// "no data reported" in those columns.
    pub fn build(
        report: &WindowReport,
        selected_manager: Option<&str>,
        placeholders: &dyn Placeholders,
    ) -> Self {
        let missing = placeholders.fund_not_exist();
        let no_data = placeholders.no_data_reported();
        let is_selected = |r: &ManagerResult| selected_manager == Some(r.manager.as_str());

        let growth = family(
            report,
            SortDirection::Descending,
            |r, m| {
                (
                    m.cumulative_growth,
                    GrowthRow {
                        manager: r.manager.clone(),
                        cumulative_growth: fmt_signed(m.cumulative_growth, 2, missing),
                        highlighted: is_selected(r),
                    },
                )
            },
            |r| GrowthRow {
                manager: r.manager.clone(),
                cumulative_growth: missing.to_string(),
                highlighted: is_selected(r),
            },
        );

        let annualized = family(
            report,
            SortDirection::Descending,
            |r, m| {
                (
                    m.annualized_return,
                    AnnualizedRow {
                        manager: r.manager.clone(),
                        avg_yearly_return: fmt_signed(m.annualized_return, 2, missing),
                        highlighted: is_selected(r),
                    },
                )
            },
            |r| AnnualizedRow {
                manager: r.manager.clone(),
                avg_yearly_return: missing.to_string(),
                highlighted: is_selected(r),
            },
        );

        let extremes = family(
            report,
            SortDirection::Ascending,
            |r, m| {
                (
                    m.extremes.map(|e| e.worst),
                    ExtremesRow {
                        manager: r.manager.clone(),
                        worst_quarter: fmt_signed(m.extremes.map(|e| e.worst), 2, missing),
                        best_quarter: fmt_signed(m.extremes.map(|e| e.best), 2, missing),
                        highlighted: is_selected(r),
                    },
                )
            },
            |r| ExtremesRow {
                manager: r.manager.clone(),
                worst_quarter: missing.to_string(),
                best_quarter: missing.to_string(),
                highlighted: is_selected(r),
            },
        );

        let participants = family(
            report,
            SortDirection::Descending,
            |r, m| {
                let row = match m.participants {
                    Some(p) => ParticipantsRow {
                        manager: r.manager.clone(),
                        participants_latest: p.latest.to_string(),
                        participants_change: fmt_count_change(p.change),
                        highlighted: is_selected(r),
                    },
                    None => ParticipantsRow {
                        manager: r.manager.clone(),
                        participants_latest: no_data.to_string(),
                        participants_change: no_data.to_string(),
                        highlighted: is_selected(r),
                    },
                };
                let key = m
                    .participants
                    .map_or(f64::NEG_INFINITY, |p| p.latest as f64);
                (Some(key), row)
            },
            |r| ParticipantsRow {
                manager: r.manager.clone(),
                participants_latest: missing.to_string(),
                participants_change: missing.to_string(),
                highlighted: is_selected(r),
            },
        );

        let expenses = family(
            report,
            SortDirection::Ascending,
            |r, m| {
                (
                    Some(m.expense_ratio.unwrap_or(f64::INFINITY)),
                    ExpenseRow {
                        manager: r.manager.clone(),
                        expense_ratio: fmt_fixed(m.expense_ratio, 3, no_data),
                        highlighted: is_selected(r),
                    },
                )
            },
            |r| ExpenseRow {
                manager: r.manager.clone(),
                expense_ratio: missing.to_string(),
                highlighted: is_selected(r),
            },
        );

        Self {
            growth,
            annualized,
            extremes,
            participants,
            expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{ParticipantDelta, QuarterExtremes};
    use core_types::{FixedPlaceholders, Period};

    fn eligible(manager: &str, metrics: ManagerMetrics) -> ManagerResult {
        ManagerResult {
            manager: manager.into(),
            coverage_years: 3.0,
            rows_in_window: 4,
            metrics: Some(metrics),
        }
    }

    fn ineligible(manager: &str) -> ManagerResult {
        ManagerResult {
            manager: manager.into(),
            coverage_years: 0.5,
            rows_in_window: 2,
            metrics: None,
        }
    }

    fn report(managers: Vec<ManagerResult>) -> WindowReport {
        WindowReport {
            period: Period::Trailing(2),
            range: None,
            requested_years: Some(2.0),
            managers,
        }
    }

    fn names<R: MetricRow>(rows: &[R]) -> Vec<&str> {
        rows.iter().map(|r| r.manager()).collect()
    }

    #[test]
    fn ineligible_manager_trails_every_table_with_placeholder() {
        let report = report(vec![
            ineligible("AAA"),
            eligible(
                "BBB",
                ManagerMetrics {
                    cumulative_growth: Some(-4.0),
                    annualized_return: Some(-2.0),
                    extremes: Some(QuarterExtremes { worst: -3.0, best: 1.0 }),
                    participants: Some(ParticipantDelta { latest: 10, change: 1 }),
                    expense_ratio: Some(0.9),
                },
            ),
        ]);
        let tables = MetricTables::build(&report, None, &FixedPlaceholders::default());

        assert_eq!(names(&tables.growth), vec!["BBB", "AAA"]);
        assert_eq!(names(&tables.extremes), vec!["BBB", "AAA"]);
        assert_eq!(names(&tables.expenses), vec!["BBB", "AAA"]);
        assert_eq!(tables.growth[1].cumulative_growth, "Fund did not exist");
        assert_eq!(
            tables.participants[1].cells(),
            vec!["Fund did not exist", "Fund did not exist"]
        );
    }

    #[test]
    fn missing_participants_and_expenses_read_no_data_and_sort_last() {
        let report = report(vec![
            eligible(
                "A",
                ManagerMetrics {
                    participants: None,
                    expense_ratio: None,
                    ..Default::default()
                },
            ),
            eligible(
                "B",
                ManagerMetrics {
                    participants: Some(ParticipantDelta { latest: 500, change: -5 }),
                    expense_ratio: Some(0.45),
                    ..Default::default()
                },
            ),
            ineligible("C"),
        ]);
        let tables = MetricTables::build(&report, None, &FixedPlaceholders::default());

        assert_eq!(names(&tables.participants), vec!["B", "A", "C"]);
        assert_eq!(tables.participants[0].participants_change, "-5");
        assert_eq!(tables.participants[1].participants_latest, "No data reported");

        assert_eq!(names(&tables.expenses), vec!["B", "A", "C"]);
        assert_eq!(tables.expenses[0].expense_ratio, "0.450");
        assert_eq!(tables.expenses[1].expense_ratio, "No data reported");
        assert_eq!(tables.expenses[2].expense_ratio, "Fund did not exist");
    }

    #[test]
    fn extremes_rank_by_worst_quarter_ascending() {
        let with_worst = |worst| ManagerMetrics {
            extremes: Some(QuarterExtremes { worst, best: 5.0 }),
            ..Default::default()
        };
        let report = report(vec![
            eligible("A", with_worst(-1.0)),
            eligible("B", with_worst(-7.5)),
            eligible("C", with_worst(-3.0)),
        ]);
        let tables = MetricTables::build(&report, None, &FixedPlaceholders::default());
        assert_eq!(names(&tables.extremes), vec!["B", "C", "A"]);
        assert_eq!(tables.extremes[0].cells(), vec!["-7.50", "+5.00"]);
    }

    #[test]
    fn selected_manager_is_highlighted_everywhere() {
        let report = report(vec![eligible("A", ManagerMetrics::default()), ineligible("B")]);
        let tables = MetricTables::build(&report, Some("B"), &FixedPlaceholders::default());
        assert!(!tables.growth[0].highlighted);
        assert!(tables.growth[1].highlighted);
        assert!(tables.expenses.iter().any(|r| r.manager == "B" && r.highlighted));
    }

    #[test]
    fn rows_serialize_with_manager_and_columns() {
        let report = report(vec![eligible(
            "A",
            ManagerMetrics {
                cumulative_growth: Some(17.1659),
                ..Default::default()
            },
        )]);
        let tables = MetricTables::build(&report, Some("A"), &FixedPlaceholders::default());
        let json = serde_json::to_value(&tables.growth[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "manager": "A",
                "cumulative_growth": "+17.17",
                "highlighted": true
            })
        );
    }
}
