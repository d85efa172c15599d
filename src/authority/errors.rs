//! Authority resolver error types

use thiserror::Error;

use crate::browse::BibError;

/// Result type for authority operations
pub type AuthorityResult<T> = Result<T, AuthorityError>;

/// Failures resolving authority cross-references
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// The backing authority index failed
    #[error("authority index failure: {0}")]
    Backend(String),

    /// The bibliographic count oracle failed during suppression
    #[error(transparent)]
    Bib(#[from] BibError),
}
