//! Error types for the IPA crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading data or rules.
///
/// Searching never fails; only reading and decoding input does.
#[derive(Debug, Error)]
pub enum IpaError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file held JSON of the wrong shape.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory JSON of the wrong shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No built-in rule set has this name.
    #[error("unknown rule set '{0}'")]
    UnknownRuleSet(String),
}

/// Result type for IPA operations.
pub type Result<T> = std::result::Result<T, IpaError>;

/// Reads and decodes a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| IpaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| IpaError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
