use chrono::{Datelike, Months, NaiveDate};
use core_types::{DateRange, Observation, Period};

/// Maps a period to a concrete, inclusive date interval.
///
/// `scope` is the set of observations the user is looking at (one fund type);
/// `global` is the first/last report date of the entire dataset. `All` always
/// uses `global`, regardless of the current filter. Returns `None` when no
/// interval can be resolved.
pub fn resolve_range(
    scope: &[&Observation],
    global: Option<DateRange>,
    period: Period,
) -> Option<DateRange> {
    match period {
        Period::YearToDate => year_to_date(scope),
        Period::Trailing(years) => trailing_years(scope, years),
        Period::All => global,
    }
}

fn latest_date(scope: &[&Observation]) -> Option<NaiveDate> {
    scope.iter().map(|o| o.report_date).max()
}

/// January 1 of the latest report's year up to the latest report.
pub fn year_to_date(scope: &[&Observation]) -> Option<DateRange> {
    let end = latest_date(scope)?;
    let start = NaiveDate::from_ymd_opt(end.year(), 1, 1)?;
    Some(DateRange::new(start, end))
}

/// The trailing window of `years` years ending at the latest report.
///
/// The cutoff is `N * 12 - 1` months before the latest report, so a window of
/// quarterly reports holds exactly `4 * N` of them. The start is the earliest
/// report strictly after the cutoff.
pub fn trailing_years(scope: &[&Observation], years: u32) -> Option<DateRange> {
    let end = latest_date(scope)?;
    let months = years.checked_mul(12)?.checked_sub(1)?;
    let cutoff = end.checked_sub_months(Months::new(months))?;
    let start = scope
        .iter()
        .map(|o| o.report_date)
        .filter(|date| *date > cutoff)
        .min()?;
    Some(DateRange::new(start, end))
}
