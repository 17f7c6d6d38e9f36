//! # Pension Dashboard Dataset Crate
//!
//! Owns the observation snapshot the dashboard is computed from. The snapshot
//! is a static JSON array fetched once at startup; after loading, the
//! `Dataset` is read-only for the lifetime of the process.
//!
//! ## Public API
//!
//! - `load_snapshot` / `parse_snapshot`: build a `Dataset` from snapshot JSON.
//! - `Dataset`: sorted observations plus the scope queries the dashboard needs
//!   (fund types, managers per fund type, the global date range).
//! - `preprocess`: converts raw quarterly report rows into observations.
//! - `DatasetError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod preprocess;
pub mod repository;
pub mod snapshot;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use preprocess::{Prepared, RawReport, prepare_observations};
pub use repository::Dataset;
pub use snapshot::{load_snapshot, parse_snapshot, write_snapshot};

use std::path::Path;

/// Reads a JSON array of raw report rows from disk.
pub async fn load_raw_reports(path: &Path) -> Result<Vec<RawReport>, DatasetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let reports: Vec<RawReport> = serde_json::from_str(&text)?;
    tracing::info!(path = %path.display(), rows = reports.len(), "Loaded raw reports.");
    Ok(reports)
}
