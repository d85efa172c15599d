//! Registry of open index handles
//!
//! Explicit, process-owned map of snapshot path → `VersionedIndex`,
//! injected into whatever assembles browsers. Lifecycle follows the owning
//! process; there is no implicit global state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::errors::VersionResult;
use super::versioned::VersionedIndex;

/// Process-owned registry of versioned index handles
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indexes: Mutex<HashMap<PathBuf, Arc<VersionedIndex>>>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `path`, creating an unloaded one on first request.
    pub fn get_or_create(&self, path: &Path) -> Arc<VersionedIndex> {
        let mut indexes = self.indexes.lock().unwrap();
        Arc::clone(
            indexes
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(VersionedIndex::new(path))),
        )
    }

    /// Out-of-band reload signal: check every registered index for a
    /// freshly published snapshot.
    pub fn reload_all(&self) -> VersionResult<()> {
        let handles: Vec<Arc<VersionedIndex>> = {
            let indexes = self.indexes.lock().unwrap();
            indexes.values().cloned().collect()
        };

        for handle in handles {
            handle.reopen_if_updated()?;
        }

        Ok(())
    }
}
