//! Store error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reading or writing a browse snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    /// No snapshot exists at the configured path
    #[error("no browse snapshot at {path}: build and publish one first")]
    NotFound { path: PathBuf },

    /// I/O failure against the snapshot file or its markers
    #[error("snapshot I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Framing, checksum, or ordering violation in a snapshot file
    #[error("corrupt snapshot at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    /// Wrap an I/O error with the snapshot path it occurred against,
    /// mapping a missing file to `NotFound`.
    pub fn io(path: &std::path::Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// A corruption error at the given path
    pub fn corrupt(path: &std::path::Path, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}
