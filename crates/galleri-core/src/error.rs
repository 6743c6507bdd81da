//! Error types for reading and encoding reference data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input file could not be opened or read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited input could not be parsed
    #[error("Malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    /// Items could not be encoded as JSON
    #[error("Failed to encode items: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unknown dataset '{0}'. Supported: icb, lsoa, unique-lsoa, population")]
    UnknownDataset(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
