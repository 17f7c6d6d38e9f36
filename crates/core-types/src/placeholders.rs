/// The two texts the metrics tables show instead of a number.
///
/// Implemented by the localisation layer; the ranking code only ever asks
/// for these two strings and stays language-agnostic.
pub trait Placeholders {
    /// Shown when a manager has no (or not enough) history for the window.
    fn fund_not_exist(&self) -> &str;

    /// Shown when the fund exists but did not report the value.
    fn no_data_reported(&self) -> &str;
}

/// A fixed pair of placeholder texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPlaceholders {
    pub fund_not_exist: String,
    pub no_data_reported: String,
}

impl FixedPlaceholders {
    pub fn new(fund_not_exist: impl Into<String>, no_data_reported: impl Into<String>) -> Self {
        Self {
            fund_not_exist: fund_not_exist.into(),
            no_data_reported: no_data_reported.into(),
        }
    }
}

impl Default for FixedPlaceholders {
    fn default() -> Self {
        Self::new("Fund did not exist", "No data reported")
    }
}

impl Placeholders for FixedPlaceholders {
    fn fund_not_exist(&self) -> &str {
        &self.fund_not_exist
    }

    fn no_data_reported(&self) -> &str {
        &self.no_data_reported
    }
}
