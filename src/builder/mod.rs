//! Offline browse index builder
//!
//! Consumes a stream of (text, optional raw key, filter tags) records from a
//! `RecordSource`, deduplicates headings by sort key, assigns dense
//! surrogate ids, and writes a complete snapshot which it publishes
//! atomically next to the destination path.
//!
//! # Design Principles
//!
//! - The builder owns its destination exclusively until publish; it needs no
//!   locking of its own
//! - Dedup lookups go through a bounded LRU in front of the working table
//! - Link inserts are buffered and flushed in batches
//! - Any I/O failure aborts the whole build; the serving generation is
//!   never touched

mod build;
mod errors;
mod lru;
mod source;

pub use build::{BuildStats, Builder, LINK_BATCH_SIZE};
pub use errors::{BuildError, BuildResult};
pub use source::{EnumerationSource, FlatFileSource, RecordSource, SourceRecord, TermFeed};
