use core_types::{Language, Period};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

/// Where the published snapshot lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the JSON array of observations loaded once at startup.
    pub snapshot_path: PathBuf,
    /// Directory with `en.json` / `lt.json` label overrides.
    pub locales_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/combined_results.json"),
            locales_dir: None,
        }
    }
}

/// Defaults and rules for the dashboard tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_language: Language,
    pub default_period: Period,
    /// Fund type selected on first render; the first available one if unset.
    pub default_fund_type: Option<String>,
    /// Manager selected on first render; the first available one if unset.
    pub default_manager: Option<String>,
    /// The largest trailing-year button offered.
    pub max_period_years: u32,
    /// Tolerance added to a manager's coverage before comparing it with the
    /// requested window length.
    pub coverage_epsilon: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_language: Language::En,
            default_period: Period::YearToDate,
            default_fund_type: None,
            default_manager: None,
            max_period_years: 5,
            coverage_epsilon: 1e-6,
        }
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "pension-dashboard.log".to_string(),
        }
    }
}

/// Bind address of the JSON API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
