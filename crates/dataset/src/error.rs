use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Expected a JSON array of records at the top level")]
    NotAnArray,
}
