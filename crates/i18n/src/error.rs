use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Failed to read catalogue '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalogue for '{language}' is not a flat JSON object of strings: {source}")]
    Malformed {
        language: String,
        #[source]
        source: serde_json::Error,
    },
}
