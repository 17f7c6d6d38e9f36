use crate::error::I18nError;
use core_types::{Language, Period, Placeholders};
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_EN: &str = include_str!("../locales/en.json");
const EMBEDDED_LT: &str = include_str!("../locales/lt.json");

/// Key -> template maps for every supported language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    texts: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// The catalogues compiled into the binary.
    pub fn embedded() -> Result<Self, I18nError> {
        let mut catalog = Self::default();
        catalog.merge(Language::En, EMBEDDED_EN)?;
        catalog.merge(Language::Lt, EMBEDDED_LT)?;
        Ok(catalog)
    }

    /// The embedded catalogues, overlaid from `dir` when one is configured.
    pub fn load(dir: Option<&Path>) -> Result<Self, I18nError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// The embedded catalogues overlaid with `<dir>/<lang>.json` where present.
    pub fn from_dir(dir: &Path) -> Result<Self, I18nError> {
        let mut catalog = Self::embedded()?;
        for language in Language::ALL {
            let path = dir.join(format!("{}.json", language.code()));
            if !path.exists() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
                path: path.clone(),
                source,
            })?;
            catalog.merge(language, &text)?;
            tracing::debug!(path = %path.display(), "Loaded catalogue override.");
        }
        Ok(catalog)
    }

    fn merge(&mut self, language: Language, json: &str) -> Result<(), I18nError> {
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(|source| I18nError::Malformed {
                language: language.code().to_string(),
                source,
            })?;
        self.texts.entry(language).or_default().extend(entries);
        Ok(())
    }

    fn lookup(&self, key: &str, language: Language) -> Option<&str> {
        self.texts
            .get(&language)
            .and_then(|texts| texts.get(key))
            .or_else(|| self.texts.get(&Language::En).and_then(|texts| texts.get(key)))
            .map(String::as_str)
    }

    /// The text for `key`, falling back to English and then to the key itself.
    pub fn text<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        self.lookup(key, language).unwrap_or(key)
    }

    /// Like [`Catalog::text`], substituting `{name}` variables.
    /// Variables the template does not mention are ignored; placeholders with
    /// no matching variable are left as written.
    pub fn format(&self, key: &str, language: Language, vars: &[(&str, &str)]) -> String {
        vars.iter()
            .fold(self.text(key, language).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Label of a period button.
    pub fn period_label(&self, period: Period, language: Language) -> String {
        let key = match period {
            Period::YearToDate => "period.ytd".to_string(),
            Period::All => "period.since_inception".to_string(),
            Period::Trailing(years) => format!("period.{years}y"),
        };
        match self.lookup(&key, language) {
            Some(label) => label.to_string(),
            None => period.code(),
        }
    }

    pub fn placeholders(&self, language: Language) -> LocalizedPlaceholders {
        LocalizedPlaceholders {
            fund_not_exist: self.text("msg.fund_not_exist", language).to_string(),
            no_data_reported: self.text("msg.no_data_reported", language).to_string(),
        }
    }
}

/// Placeholder texts resolved for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedPlaceholders {
    fund_not_exist: String,
    no_data_reported: String,
}

impl Placeholders for LocalizedPlaceholders {
    fn fund_not_exist(&self) -> &str {
        &self.fund_not_exist
    }

    fn no_data_reported(&self) -> &str {
        &self.no_data_reported
    }
}
