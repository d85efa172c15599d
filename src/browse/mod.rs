//! Online browse queries
//!
//! Bidirectional cursor pagination over one index generation, filter
//! predicate evaluation, bibliographic enrichment, and authority
//! cross-references, assembled behind the `Browser` facade the request
//! shell calls.
//!
//! # Invariants
//!
//! - Every query observes exactly one generation, never a mix
//! - Pages are whole or empty: a transient fetch failure is retried, then
//!   degrades to an empty window, never a partial one

mod bib;
mod browser;
mod engine;
mod errors;
mod items;

pub use bib::{BibError, BibMatches, BibliographicIndex};
pub use browser::{Browser, Direction};
pub use engine::{find_start, page_backward, page_forward, BrowseWindow, HeadingSource};
pub use errors::{QueryError, QueryResult};
pub use items::{BrowseItem, BrowseList};
