//! Bibliographic collaborator interface
//!
//! The bibliographic index is external; the browse engine only asks it
//! which records match a heading (optionally under the request's filter
//! query) and how many records a heading has.

use std::collections::HashMap;

use thiserror::Error;

use crate::filter::FilterQuery;

/// Failure in the external bibliographic index
#[derive(Debug, Error)]
#[error("bibliographic index failure: {0}")]
pub struct BibError(pub String);

/// Matching records for one heading: record ids plus one value per
/// requested extra field per record.
#[derive(Debug, Clone, Default)]
pub struct BibMatches {
    pub ids: Vec<String>,
    pub extras: HashMap<String, Vec<String>>,
}

/// The external bibliographic index
pub trait BibliographicIndex {
    /// Record ids matching `heading`, with one value of each extra field
    /// per record; `filter` narrows matches with the request's filter query.
    fn matching_ids(
        &self,
        heading: &str,
        extra_fields: &[String],
        filter: Option<&FilterQuery>,
    ) -> Result<BibMatches, BibError>;

    /// Number of bibliographic records for `heading`
    fn record_count(&self, heading: &str) -> Result<usize, BibError>;
}
