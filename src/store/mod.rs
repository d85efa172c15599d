//! Persisted browse snapshot storage
//!
//! One generation of the browse index = one snapshot file holding four
//! tables: headings (in sorted rowid order), the filter-type dictionary,
//! the filter-value dictionary, and the heading/filter-value link relation.
//!
//! # Design Principles
//!
//! - Snapshots are immutable once published; a rebuild creates a new file
//! - Every record carries a CRC32 checksum; any failure on read aborts open
//! - Lookup structures are derived state, rebuilt in memory at open
//!
//! # Side markers
//!
//! Relative to a snapshot path `P`, the builder publishes `P-updated` (the
//! freshly built file) and `P-ready` (the swap-in flag, consumed exactly
//! once per swap by the version manager).

mod checksum;
mod errors;
mod format;
mod generation;
mod manifest;
mod writer;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{StoreError, StoreResult};
pub use format::{FilterLink, FilterType, FilterValue, Heading, MAGIC};
pub use generation::Generation;
pub use manifest::SnapshotManifest;
pub use writer::{publish, write_snapshot};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of the freshly built snapshot awaiting adoption
pub fn updated_path(path: &Path) -> PathBuf {
    sibling(path, "-updated")
}

/// Path of the "generation ready" flag file
pub fn ready_path(path: &Path) -> PathBuf {
    sibling(path, "-ready")
}

/// Scratch path the builder writes before publishing
pub fn tmp_path(path: &Path) -> PathBuf {
    sibling(path, "-tmp")
}
