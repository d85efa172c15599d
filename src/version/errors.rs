//! Version manager error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for version operations
pub type VersionResult<T> = Result<T, VersionError>;

/// Failures opening or swapping index generations
#[derive(Debug, Error)]
pub enum VersionError {
    /// No generation has ever been built at this path
    #[error("no browse index available at {path}: run the builder and publish a snapshot")]
    Unavailable { path: PathBuf },

    /// The snapshot exists but could not be opened
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Adopting a freshly built snapshot failed mid-swap
    #[error("failed to install new snapshot at {path}: {source}")]
    Swap {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
