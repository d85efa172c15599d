//! Browse query error types

use thiserror::Error;

use super::bib::BibError;
use crate::authority::AuthorityError;
use crate::store::StoreError;
use crate::version::VersionError;

/// Result type for browse queries
pub type QueryResult<T> = Result<T, QueryError>;

/// Failures serving one browse query.
///
/// Query failures are isolated per request and never corrupt shared state.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No generation is available (index never built, or unopenable)
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The snapshot failed while locating a start position
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Authority cross-reference lookup failed
    #[error(transparent)]
    Authority(#[from] AuthorityError),

    /// Bibliographic enrichment failed
    #[error(transparent)]
    Bib(#[from] BibError),
}
