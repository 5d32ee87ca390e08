use std::path::PathBuf;
use tasklists_core::FilterError;
use thiserror::Error;

/// Error types for the tlf command line
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Error reading the catalog file
    #[error("Failed to read catalog at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the catalog file
    #[error("Failed to parse catalog at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Error with the catalog path (invalid or undeterminable)
    #[error("Invalid catalog path: {path} - {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    /// Error serializing command output
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    /// A filter could not be assembled
    #[error("Failed to build filter")]
    Filter(#[from] FilterError),
}

impl CatalogError {
    /// Get the full error message including the underlying filter error.
    pub fn full_message(&self) -> String {
        match self {
            CatalogError::Filter(err) => format!("Failed to build filter: {}", err),
            other => other.to_string(),
        }
    }
}

/// Result type alias for CLI operations
pub type CatalogResult<T> = Result<T, CatalogError>;
