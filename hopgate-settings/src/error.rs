//! Error types for the settings layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors that can occur reading or writing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem error.
    #[error("settings io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings document is not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The platform has no user configuration directory.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
