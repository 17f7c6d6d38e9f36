use analyzer::{Analyzer, DashboardSession, MetricRow, MetricTables};
use chrono::NaiveDate;
use configuration::DashboardConfig;
use core_types::{FixedPlaceholders, Language, Observation, Period};
use dataset::{Dataset, parse_snapshot};
use i18n::Catalog;
use std::sync::Arc;

fn quarter_ends(from_year: i32, count: usize) -> Vec<NaiveDate> {
    (from_year..)
        .flat_map(|y| {
            [(3, 31), (6, 30), (9, 30), (12, 31)]
                .map(|(m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
        })
        .take(count)
        .collect()
}

fn series(fund_type: &str, manager: &str, dates: &[NaiveDate], change: f64) -> Vec<Observation> {
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| Observation {
            report_date: *date,
            fund_type: fund_type.into(),
            manager: manager.into(),
            relative_change: Some(change),
            participant_count: Some(1000.0 + 100.0 * i as f64),
            expense_ratio_pct: Some(0.6),
        })
        .collect()
}

fn managers<R: MetricRow>(rows: &[R]) -> Vec<&str> {
    rows.iter().map(|r| r.manager()).collect()
}

/// A: reports from 2022-12-31 to 2024-12-31, two full years of history.
/// B: only the last three quarters of 2024.
fn two_year_dataset() -> Dataset {
    let dates = quarter_ends(2022, 12);
    let mut data = series("TIPF", "A", &dates[3..], 2.0);
    data.extend(series("TIPF", "B", &dates[9..], 1.0));
    Dataset::new(data)
}

#[test]
fn two_year_window_ranks_full_history_manager_only() {
    let dataset = two_year_dataset();
    let analyzer = Analyzer::default();
    let placeholders = FixedPlaceholders::default();

    let (report, tables) =
        analyzer.run(&dataset, "TIPF", Period::Trailing(2), None, &placeholders);

    let a = &report.managers[0];
    assert_eq!(a.rows_in_window, 8);
    let growth = a.metrics.as_ref().unwrap().cumulative_growth.unwrap();
    assert!((growth - (1.02f64.powi(8) - 1.0) * 100.0).abs() < 1e-9);

    assert_eq!(tables.growth[0].cumulative_growth, "+17.17");
    assert_eq!(tables.annualized[0].avg_yearly_return, "+8.24");
    assert_eq!(tables.extremes[0].cells(), vec!["+2.00", "+2.00"]);
    assert_eq!(tables.participants[0].cells(), vec!["1800", "+700"]);
    assert_eq!(tables.expenses[0].expense_ratio, "0.600");

    assert_eq!(tables.growth[1].cumulative_growth, "Fund did not exist");
    assert_eq!(managers(&tables.growth), vec!["A", "B"]);
    assert_eq!(managers(&tables.annualized), vec!["A", "B"]);
    assert_eq!(managers(&tables.extremes), vec!["A", "B"]);
    assert_eq!(managers(&tables.participants), vec!["A", "B"]);
    assert_eq!(managers(&tables.expenses), vec!["A", "B"]);
}

#[test]
fn all_period_is_measured_against_the_whole_dataset() {
    // Y spans ten years; fund type X only five.
    let mut data = series("Y", "Old", &quarter_ends(2014, 41), 1.0);
    data.extend(series("X", "Young", &quarter_ends(2019, 21), 1.0));
    let dataset = Dataset::new(data);

    let report = Analyzer::default().analyze(&dataset, "X", Period::All);
    assert_eq!(report.range, dataset.global_range());
    assert!(report.requested_years.unwrap() > 9.99);
    assert_eq!(report.managers.len(), 1);
    assert!(!report.managers[0].is_eligible());
    assert_eq!(report.managers[0].rows_in_window, 21);

    let tables = MetricTables::build(&report, None, &FixedPlaceholders::default());
    assert_eq!(tables.growth[0].cumulative_growth, "Fund did not exist");
}

#[test]
fn growth_sorts_descending_with_ineligible_last() {
    let dates = quarter_ends(2024, 4);
    let mut data = series("T", "Down", &dates, -0.5);
    data.extend(series("T", "Up", &dates, 1.25));
    data.extend(series("T", "Gone", &quarter_ends(2022, 2), 1.0));
    let dataset = Dataset::new(data);

    let (_, tables) = Analyzer::default().run(
        &dataset,
        "T",
        Period::YearToDate,
        Some("Down"),
        &FixedPlaceholders::default(),
    );
    assert_eq!(managers(&tables.growth), vec!["Up", "Down", "Gone"]);
    assert!(tables.growth[1].cumulative_growth.starts_with('-'));
    assert!(tables.growth[1].highlighted);
    // Lower expense ratio ranks first; both are 0.6, so name order holds.
    assert_eq!(managers(&tables.expenses), vec!["Down", "Up", "Gone"]);
}

#[test]
fn single_report_is_too_short_for_a_three_year_window() {
    let dataset = Dataset::new(series("T", "A", &quarter_ends(2024, 1), 1.0));
    let report = Analyzer::default().analyze(&dataset, "T", Period::Trailing(3));
    assert_eq!(report.managers.len(), 1);
    assert_eq!(report.eligible().count(), 0);
}

#[test]
fn snapshot_to_localized_view() {
    let json = r#"[
        {"report_date": "2023-12-31", "fund_type": "TIPF", "company_short": "SEB",
         "relative_change": 1.0, "number_of_participants": 100, "bik_pct": 0.5},
        {"report_date": "2024-03-31", "fund_type": "TIPF", "company_short": "SEB",
         "relative_change": "2,5", "number_of_participants": 120, "bik_pct": null},
        {"report_date": "2024-03-31", "fund_type": "TIPF", "company_short": "Luminor",
         "relative_change": -1.0, "number_of_participants": null, "bik_pct": "0.4"},
        {"report_date": "not a date", "fund_type": "TIPF", "company_short": "Artea",
         "relative_change": 1.0, "number_of_participants": 1, "bik_pct": 1.0}
    ]"#;
    let dataset = parse_snapshot(json).unwrap();
    assert_eq!(dataset.len(), 3);

    let config = DashboardConfig {
        default_language: Language::Lt,
        default_manager: Some("SEB".into()),
        ..DashboardConfig::default()
    };
    let session = DashboardSession::new(
        Arc::new(dataset),
        Arc::new(Catalog::embedded().unwrap()),
        &config,
    );
    let view = session.view();

    assert_eq!(view.selection.fund_type.as_deref(), Some("TIPF"));
    assert_eq!(view.selection.manager.as_deref(), Some("SEB"));
    assert_eq!(managers(&view.tables.growth), vec!["SEB", "Luminor"]);
    assert_eq!(view.tables.growth[0].cumulative_growth, "+2.50");
    assert!(view.tables.growth[0].highlighted);

    assert_eq!(managers(&view.tables.expenses), vec!["Luminor", "SEB"]);
    assert_eq!(view.tables.expenses[1].expense_ratio, "Duomenys nepateikti");
    assert_eq!(view.tables.participants[1].participants_latest, "Duomenys nepateikti");
}
