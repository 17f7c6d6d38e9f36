//! The per-manager metric families. Every function returns `None` instead of a
//! number when the input does not support the metric.

use serde::{Deserialize, Serialize};

/// Lowest and highest single-quarter change in the window, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterExtremes {
    pub worst: f64,
    pub best: f64,
}

/// Participant headcount at the end of the window and its change over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDelta {
    pub latest: i64,
    pub change: i64,
}

fn present(changes: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    changes.iter().flatten().copied().filter(|c| c.is_finite())
}

/// Compounded growth of quarterly percentage changes, in percent.
pub fn geometric_cumulative_growth(changes: &[Option<f64>]) -> Option<f64> {
    let mut rates = present(changes).map(|c| c / 100.0).peekable();
    rates.peek()?;
    let growth = rates.fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;
    Some(growth * 100.0)
}

/// The constant yearly rate equivalent to the cumulative growth, assuming
/// each present change covers one quarter.
pub fn annualized_return(changes: &[Option<f64>]) -> Option<f64> {
    let quarters = present(changes).count();
    let years = quarters as f64 / 4.0;
    if years <= 0.0 {
        return None;
    }
    let growth = geometric_cumulative_growth(changes)?;
    let annualized = ((1.0 + growth / 100.0).powf(1.0 / years) - 1.0) * 100.0;
    Some(annualized).filter(|v| v.is_finite())
}

pub fn quarterly_extremes(changes: &[Option<f64>]) -> Option<QuarterExtremes> {
    present(changes).fold(None, |acc, c| match acc {
        None => Some(QuarterExtremes { worst: c, best: c }),
        Some(e) => Some(QuarterExtremes {
            worst: e.worst.min(c),
            best: e.best.max(c),
        }),
    })
}

/// Compares the first and last participant counts of the window. Both ends
/// must be reported; a gap in between does not matter.
pub fn participant_delta(first: Option<f64>, latest: Option<f64>) -> Option<ParticipantDelta> {
    let first = first.filter(|v| v.is_finite())?;
    let latest = latest.filter(|v| v.is_finite())?;
    Some(ParticipantDelta {
        latest: latest.round() as i64,
        change: (latest - first).round() as i64,
    })
}

/// The last reported expense ratio of the window.
pub fn expense_ratio(latest: Option<f64>) -> Option<f64> {
    latest.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn growth_compounds_quarterly_changes() {
        let changes = vec![Some(2.0); 8];
        assert_close(
            geometric_cumulative_growth(&changes).unwrap(),
            (1.02f64.powi(8) - 1.0) * 100.0,
        );
        assert_close(
            geometric_cumulative_growth(&[Some(10.0), Some(-10.0)]).unwrap(),
            -1.0,
        );
    }

    #[test]
    fn growth_of_nothing_is_undefined() {
        assert_eq!(geometric_cumulative_growth(&[]), None);
        assert_eq!(geometric_cumulative_growth(&[None, None]), None);
    }

    #[test]
    fn growth_skips_missing_quarters() {
        assert_close(
            geometric_cumulative_growth(&[Some(5.0), None, Some(5.0)]).unwrap(),
            10.25,
        );
    }

    #[test]
    fn annualized_return_reproduces_cumulative_growth() {
        let series: Vec<Vec<Option<f64>>> = vec![
            vec![Some(2.0); 8],
            vec![Some(-3.5), Some(4.0), Some(1.1)],
            vec![Some(12.0), None, Some(-8.0), Some(0.4), Some(3.3), Some(-0.2)],
        ];
        for changes in series {
            let growth = geometric_cumulative_growth(&changes).unwrap();
            let annualized = annualized_return(&changes).unwrap();
            let years = changes.iter().flatten().count() as f64 / 4.0;
            let compounded = (1.0 + annualized / 100.0).powf(years);
            assert!((compounded - (1.0 + growth / 100.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn annualized_return_of_one_year_equals_growth() {
        let changes = vec![Some(1.0); 4];
        assert_close(
            annualized_return(&changes).unwrap(),
            geometric_cumulative_growth(&changes).unwrap(),
        );
        assert_eq!(annualized_return(&[None]), None);
    }

    #[test]
    fn extremes_ignore_missing_values() {
        let extremes = quarterly_extremes(&[Some(1.5), None, Some(-4.2), Some(3.0)]).unwrap();
        assert_eq!(extremes, QuarterExtremes { worst: -4.2, best: 3.0 });
        assert_eq!(quarterly_extremes(&[None]), None);
    }

    #[test]
    fn participant_delta_rounds_and_needs_both_ends() {
        assert_eq!(
            participant_delta(Some(1000.0), Some(1250.6)),
            Some(ParticipantDelta { latest: 1251, change: 251 })
        );
        assert_eq!(
            participant_delta(Some(1300.0), Some(1250.0)),
            Some(ParticipantDelta { latest: 1250, change: -50 })
        );
        assert_eq!(participant_delta(None, Some(5.0)), None);
        assert_eq!(participant_delta(Some(5.0), Some(f64::NAN)), None);
    }

    #[test]
    fn expense_ratio_passes_through_reported_values() {
        assert_eq!(expense_ratio(Some(0.45)), Some(0.45));
        assert_eq!(expense_ratio(None), None);
    }
}
