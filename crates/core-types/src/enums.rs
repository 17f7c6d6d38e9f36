use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lookback window a user selects for the metrics tables.
///
/// On the wire (query strings, config files, JSON) a period is always a plain
/// string: `"YTD"`, `"ALL"` or a positive year count such as `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// From January 1 of the latest reporting year up to the latest report.
    #[default]
    YearToDate,
    /// The trailing `N` years ending at the latest report.
    Trailing(u32),
    /// The full history of the whole dataset ("Since Inception" in the UI).
    All,
}

impl Period {
    /// The code used in query strings and the i18n label key.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::YearToDate => f.write_str("YTD"),
            Period::All => f.write_str("ALL"),
            Period::Trailing(years) => write!(f, "{years}"),
        }
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.eq_ignore_ascii_case("YTD") {
            return Ok(Period::YearToDate);
        }
        if code.eq_ignore_ascii_case("ALL") {
            return Ok(Period::All);
        }
        match code.parse::<u32>() {
            Ok(years) if years > 0 => Ok(Period::Trailing(years)),
            _ => Err(CoreError::InvalidInput(
                "period".to_string(),
                format!("expected YTD, ALL or a positive year count, got '{s}'"),
            )),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// The two languages the dashboard labels are published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    Lt,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Lt];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Lt => "lt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "lt" => Ok(Language::Lt),
            other => Err(CoreError::InvalidInput(
                "language".to_string(),
                format!("unsupported language '{other}'"),
            )),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}
