//! browsedb - a deterministic, atomically-published browse index for
//! bibliographic headings
//!
//! An offline builder compacts (sort key, display text, filter tags)
//! records into an immutable, rowid-ordered snapshot; an online engine
//! pages bidirectionally over it, lowers boolean filter queries into index
//! predicates, resolves authority cross-references, and hot-swaps freshly
//! built snapshots under live readers.

pub mod authority;
pub mod browse;
pub mod builder;
pub mod cli;
pub mod config;
pub mod filter;
pub mod normalize;
pub mod observe;
pub mod store;
pub mod version;
