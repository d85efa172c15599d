//! Builder error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Failures during index construction.
///
/// All of these abort the build; malformed filter tags are not errors and
/// are logged and skipped instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// I/O failure reading the heading source
    #[error("failed to read heading source {path}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A live record source (term enumeration) failed
    #[error("record source failure: {0}")]
    Source(String),

    /// Writing or publishing the snapshot failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
