use crate::error::ConfigError;
use crate::settings::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Installs the global tracing subscriber.
///
/// Console output always goes to stderr so table output on stdout stays
/// clean. If a log directory is configured, a daily rolling file is added.
/// The returned guard flushes the file writer on drop and must be kept alive
/// for as long as the program logs.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = || match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(&config.level),
    };

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter()?);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter()?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        directory = ?config.directory,
        "Tracing initialized."
    );
    Ok(guard)
}

/// Parses the configured filter directive, e.g. `"info,analytics=debug"`.
fn level_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(level)
        .map_err(|e| ConfigError::ValidationError(format!("invalid log level '{level}': {e}")))
}
