//! Option lists and coercion rules for the dashboard's three selectors.

use analytics::coverage::coverage_years;
use core_types::Period;
use dataset::Dataset;

/// Every fund type of the dataset, sorted.
pub fn fund_type_options(dataset: &Dataset) -> Vec<String> {
    dataset.fund_types()
}

/// Managers reporting under `fund_type`, sorted; every manager when no fund
/// type is selected.
pub fn manager_options(dataset: &Dataset, fund_type: Option<&str>) -> Vec<String> {
    dataset.managers(fund_type)
}

/// The period buttons for the current selection.
///
/// Always `YTD` first and `ALL` last. Trailing buttons run from one year up
/// to the selected manager's own history span in whole years, capped at
/// `max_years`. Without a fund type every trailing button up to the cap is
/// offered.
pub fn period_options(
    dataset: &Dataset,
    fund_type: Option<&str>,
    manager: Option<&str>,
    max_years: u32,
) -> Vec<Period> {
    let available = match fund_type {
        None => max_years,
        Some(fund_type) => {
            let history = match manager {
                Some(manager) => dataset.for_manager(fund_type, manager),
                None => Vec::new(),
            };
            let span = coverage_years(&history).floor();
            // Bounded by max_years before the cast, so it cannot truncate.
            span.clamp(0.0, f64::from(max_years)) as u32
        }
    };

    std::iter::once(Period::YearToDate)
        .chain((1..=available).map(Period::Trailing))
        .chain(std::iter::once(Period::All))
        .collect()
}

/// Keeps `selected` when it is on offer, otherwise falls back to the first
/// option.
pub fn coerce_choice(selected: Option<&str>, options: &[String]) -> Option<String> {
    match selected {
        Some(choice) if options.iter().any(|o| o == choice) => Some(choice.to_string()),
        _ => options.first().cloned(),
    }
}

/// Keeps `selected` when it is on offer, otherwise falls back to `YTD`.
pub fn coerce_period(selected: Period, options: &[Period]) -> Period {
    if options.contains(&selected) {
        selected
    } else {
        Period::YearToDate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Observation;

    fn obs(fund_type: &str, manager: &str, y: i32, m: u32, d: u32) -> Observation {
        Observation {
            report_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            fund_type: fund_type.into(),
            manager: manager.into(),
            relative_change: Some(1.0),
            participant_count: None,
            expense_ratio_pct: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            obs("TIPF", "SEB", 2017, 3, 31),
            obs("TIPF", "SEB", 2024, 3, 31),
            obs("TIPF", "Luminor", 2021, 12, 31),
            obs("TIPF", "Luminor", 2024, 3, 31),
            obs("1996-2002", "Swedbank", 2024, 3, 31),
        ])
    }

    #[test]
    fn periods_follow_the_selected_managers_span() {
        let data = dataset();
        let luminor = period_options(&data, Some("TIPF"), Some("Luminor"), 5);
        assert_eq!(
            luminor,
            vec![Period::YearToDate, Period::Trailing(1), Period::Trailing(2), Period::All]
        );

        let seb = period_options(&data, Some("TIPF"), Some("SEB"), 5);
        assert_eq!(seb.len(), 7);
        assert_eq!(seb[5], Period::Trailing(5));
    }

    #[test]
    fn periods_without_fund_type_offer_everything() {
        let periods = period_options(&dataset(), None, None, 3);
        assert_eq!(
            periods,
            vec![
                Period::YearToDate,
                Period::Trailing(1),
                Period::Trailing(2),
                Period::Trailing(3),
                Period::All
            ]
        );
    }

    #[test]
    fn single_report_manager_gets_only_ytd_and_all() {
        let periods = period_options(&dataset(), Some("1996-2002"), Some("Swedbank"), 5);
        assert_eq!(periods, vec![Period::YearToDate, Period::All]);
    }

    #[test]
    fn manager_outside_fund_type_is_replaced_by_first_option() {
        let data = dataset();
        let options = manager_options(&data, Some("TIPF"));
        assert_eq!(options, vec!["Luminor", "SEB"]);
        assert_eq!(
            coerce_choice(Some("Swedbank"), &options),
            Some("Luminor".to_string())
        );
        assert_eq!(coerce_choice(Some("SEB"), &options), Some("SEB".to_string()));
        assert_eq!(coerce_choice(Some("SEB"), &[]), None);
    }

    #[test]
    fn period_outside_options_falls_back_to_ytd() {
        let options = vec![Period::YearToDate, Period::Trailing(1), Period::All];
        assert_eq!(coerce_period(Period::Trailing(4), &options), Period::YearToDate);
        assert_eq!(coerce_period(Period::All, &options), Period::All);
    }
}
