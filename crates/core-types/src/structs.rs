use crate::enums::{Language, Period};
use crate::error::CoreError;
use crate::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average days per year used for every history-span calculation.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of years between two dates, measured in whole days.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / DAYS_PER_YEAR
}

/// One reporting-period record for a (fund type, manager) pair.
///
/// Serializes to the snapshot format consumed by the dashboard, so the
/// preprocessing step can write observations straight back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub report_date: NaiveDate,
    pub fund_type: String,
    #[serde(rename = "company_short")]
    pub manager: String,
    /// Quarterly return in percent.
    pub relative_change: Option<f64>,
    #[serde(rename = "number_of_participants")]
    pub participant_count: Option<f64>,
    #[serde(rename = "bik_pct")]
    pub expense_ratio_pct: Option<f64>,
}

/// A snapshot record as published, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub fund_type: Option<String>,
    #[serde(default)]
    pub company_short: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub relative_change: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub number_of_participants: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bik_pct: Option<f64>,
}

impl TryFrom<RawObservation> for Observation {
    type Error = CoreError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        let date_text = raw.report_date.ok_or(CoreError::MissingField("report_date"))?;
        let report_date = lenient::parse_date(&date_text).ok_or_else(|| {
            CoreError::InvalidInput("report_date".to_string(), date_text.clone())
        })?;
        let fund_type = non_blank(raw.fund_type).ok_or(CoreError::MissingField("fund_type"))?;
        let manager = non_blank(raw.company_short).ok_or(CoreError::MissingField("company_short"))?;

        Ok(Observation {
            report_date,
            fund_type,
            manager,
            relative_change: raw.relative_change,
            participant_count: raw.number_of_participants,
            expense_ratio_pct: raw.bik_pct,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A closed date interval; both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn span_years(&self) -> f64 {
        years_between(self.start, self.end)
    }
}

/// What the user currently has selected on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub fund_type: Option<String>,
    pub manager: Option<String>,
    pub period: Period,
    pub language: Language,
}
