//! Configuration error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid or unreadable service configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file unreadable
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid JSON for the expected shape
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No browse sources configured
    #[error("config {path} declares no browse sources")]
    NoSources { path: PathBuf },
}
