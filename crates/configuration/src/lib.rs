use crate::error::ConfigError;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DashboardConfig, DataConfig, LoggingConfig, ServerConfig, Settings};

/// Prefix for environment overrides, e.g. `PENSION_DASH__SERVER__PORT=8080`.
const ENV_PREFIX: &str = "PENSION_DASH";

/// Loads the application configuration from `config.toml` in the working
/// directory, overlaid with `PENSION_DASH__*` environment variables.
///
/// The file is optional; every section has defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(Path::new("config.toml"), false)
}

/// Loads configuration from an explicit file. When `required` is false a
/// missing file is treated as empty.
pub fn load_config_from(path: &Path, required: bool) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    Ok(settings)
}

/// Rejects settings the dashboard cannot work with.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let dashboard = &settings.dashboard;
    if dashboard.max_period_years == 0 {
        return Err(ConfigError::ValidationError(
            "dashboard.max_period_years must be at least 1".to_string(),
        ));
    }
    if !dashboard.coverage_epsilon.is_finite() || dashboard.coverage_epsilon < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "dashboard.coverage_epsilon must be a non-negative number, got {}",
            dashboard.coverage_epsilon
        )));
    }
    if settings.logging.file_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.file_prefix must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Command-line values that take precedence over the loaded file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file (defaults to ./config.toml).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,

    /// Path to the observation snapshot, overriding `data.snapshot_path`.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub snapshot: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "analyzer=trace".
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Loads the settings, honouring `--config`, then applies the overrides.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => load_config_from(path, true)?,
            None => load_config()?,
        };
        self.apply(&mut settings);
        Ok(settings)
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(snapshot) = &self.snapshot {
            settings.data.snapshot_path = snapshot.clone();
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}
