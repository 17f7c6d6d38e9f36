//! Turns raw quarterly fund reports into dashboard observations.
//!
//! Reports publish the year-to-date unit value change. The dashboard works on
//! quarterly changes, so consecutive YTD figures of the same fund within a
//! calendar year are de-compounded into per-quarter returns.

use chrono::{Datelike, NaiveDate};
use core_types::{Observation, lenient};
use serde::Deserialize;
use serde_json::Value;

/// One fund row as it appears in a published quarterly report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReport {
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub fund_code: Option<String>,
    #[serde(default)]
    pub fund_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub number_of_participants: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_value_change_ytd_pct: Option<f64>,
    /// Free text in the reports, e.g. `"0,50 %"`.
    #[serde(default)]
    pub bar_pct: Option<Value>,
}

/// Result of a preprocessing run.
#[derive(Debug, Clone, Default)]
pub struct Prepared {
    pub observations: Vec<Observation>,
    pub dropped: usize,
}

/// Maps the fund-code suffix to the participants' birth-year cohort.
pub fn fund_type_for_code(fund_code: &str) -> Option<&'static str> {
    let suffix = fund_code.rsplit('-').next()?.trim();
    let fund_type = match suffix {
        "03/09" => "2003-2009",
        "96/02" => "1996-2002",
        "89/95" => "1989-1995",
        "82/88" => "1982-1988",
        "75/81" => "1975-1981",
        "68/74" => "1968-1974",
        "61/67" => "1961-1967",
        "54/60" => "1954-1960",
        "TIPF" => "TIPF",
        _ => return None,
    };
    Some(fund_type)
}

/// Maps the fund-code prefix to the manager's short name.
pub fn manager_for_code(fund_code: &str) -> Option<&'static str> {
    let prefix = fund_code.split('-').next()?.trim();
    let manager = match prefix {
        "LMN" => "Luminor",
        "INV" => "Artea",
        "SBN" => "SEB",
        "SWD" => "Swedbank",
        "AVI" => "Allianz",
        "GOX" => "Goindex",
        _ => return None,
    };
    Some(manager)
}

/// Extracts the first unsigned decimal number from report text.
pub fn extract_decimal(text: &str) -> Option<f64> {
    let normalized = text.replace(',', ".");
    let start = normalized.find(|c: char| c.is_ascii_digit())?;
    let tail = &normalized[start..];

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in tail.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    tail[..end].trim_end_matches('.').parse().ok()
}

fn expense_ratio(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_decimal(s),
        _ => None,
    }
}

struct Keyed {
    fund_code: String,
    report_date: NaiveDate,
    ytd_pct: f64,
    observation: Observation,
}

/// Validates, maps and de-compounds raw report rows.
///
/// Rows without a usable date, a known fund code or a YTD figure are dropped.
pub fn prepare_observations(reports: Vec<RawReport>) -> Prepared {
    let total = reports.len();
    let mut rows: Vec<Keyed> = reports.into_iter().filter_map(keyed).collect();
    let dropped = total - rows.len();

    rows.sort_by(|a, b| {
        a.fund_code
            .cmp(&b.fund_code)
            .then_with(|| a.report_date.cmp(&b.report_date))
    });

    let mut previous: Option<(&str, NaiveDate, f64)> = None;
    let mut changes = Vec::with_capacity(rows.len());
    for row in &rows {
        let ytd = row.ytd_pct / 100.0;
        let change = match previous {
            Some((code, date, prev_ytd))
                if code == row.fund_code && date.year() == row.report_date.year() =>
            {
                (1.0 + ytd) / (1.0 + prev_ytd) - 1.0
            }
            _ => ytd,
        };
        changes.push(change * 100.0);
        previous = Some((row.fund_code.as_str(), row.report_date, ytd));
    }

    let observations = rows
        .into_iter()
        .zip(changes)
        .map(|(row, change)| Observation {
            relative_change: Some(change).filter(|c| c.is_finite()),
            ..row.observation
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(dropped, total, "Dropped raw report rows during preprocessing.");
    }

    Prepared {
        observations,
        dropped,
    }
}

fn keyed(report: RawReport) -> Option<Keyed> {
    let report_date = lenient::parse_date(report.report_date.as_deref()?)?;
    let fund_code = report.fund_code.as_deref()?.trim().to_string();
    let fund_type = fund_type_for_code(&fund_code)?;
    let manager = manager_for_code(&fund_code)?;
    let ytd_pct = report.unit_value_change_ytd_pct?;

    Some(Keyed {
        observation: Observation {
            report_date,
            fund_type: fund_type.to_string(),
            manager: manager.to_string(),
            relative_change: None,
            participant_count: report.number_of_participants,
            expense_ratio_pct: expense_ratio(report.bar_pct.as_ref()),
        },
        fund_code,
        report_date,
        ytd_pct,
    })
}
