//! Versioned index handle
//!
//! Staleness is detected from the publish markers next to the snapshot
//! path: `P-updated` (new snapshot) plus `P-ready` (swap flag). Detection
//! runs opportunistically before a query or on an explicit signal; when no
//! new generation is ready it is a no-op. The swap holds the write lock,
//! so it excludes new readers for one bounded critical section only;
//! in-flight readers keep their `Arc` and are unaffected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::errors::{VersionError, VersionResult};
use crate::observe::Logger;
use crate::store::{ready_path, updated_path, Generation, StoreError};

/// One snapshot path and its currently open generation, if any
#[derive(Debug)]
pub struct VersionedIndex {
    path: PathBuf,
    current: RwLock<Option<Arc<Generation>>>,
}

impl VersionedIndex {
    /// Handle for the snapshot at `path`; starts unloaded.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(None),
        }
    }

    /// The snapshot path this handle owns
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active generation, opening lazily on first use.
    ///
    /// The returned `Arc` pins one consistent generation for the caller's
    /// whole query regardless of concurrent swaps.
    pub fn current(&self) -> VersionResult<Arc<Generation>> {
        if let Some(gen) = self.current.read().unwrap().as_ref() {
            return Ok(Arc::clone(gen));
        }

        let mut slot = self.current.write().unwrap();
        // Another caller may have opened it while we waited
        if let Some(gen) = slot.as_ref() {
            return Ok(Arc::clone(gen));
        }

        if self.swap_pending() {
            self.install_pending()?;
        }

        match Generation::open(&self.path) {
            Ok(gen) => {
                let gen = Arc::new(gen);
                *slot = Some(Arc::clone(&gen));
                Ok(gen)
            }
            Err(StoreError::NotFound { .. }) => Err(VersionError::Unavailable {
                path: self.path.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Check for a freshly published snapshot and swap it in.
    ///
    /// No-op when nothing is pending. A missing index stays unloaded here;
    /// it is reported when a query asks for the current generation.
    pub fn reopen_if_updated(&self) -> VersionResult<()> {
        if !self.swap_pending() {
            return Ok(());
        }

        let mut slot = self.current.write().unwrap();
        // Re-check under exclusive access; another caller may have swapped
        if !self.swap_pending() {
            return Ok(());
        }

        Logger::info(
            "INDEX_SWAP_BEGIN",
            &[("path", &self.path.display().to_string())],
        );

        // Close our handle to the old generation; readers still holding it
        // keep it alive until they finish
        *slot = None;

        self.install_pending()?;

        let gen = Arc::new(Generation::open(&self.path)?);
        Logger::info(
            "INDEX_SWAP_COMPLETE",
            &[
                ("path", &self.path.display().to_string()),
                ("total", &gen.total_count().to_string()),
            ],
        );
        *slot = Some(gen);

        Ok(())
    }

    /// Both publish markers present: a new generation is ready.
    fn swap_pending(&self) -> bool {
        ready_path(&self.path).exists() && updated_path(&self.path).exists()
    }

    /// Adopt `P-updated` as `P`, consuming the ready flag exactly once.
    /// Caller must hold exclusive access.
    fn install_pending(&self) -> VersionResult<()> {
        let swap_err = |source: io::Error| VersionError::Swap {
            path: self.path.clone(),
            source,
        };

        match fs::remove_file(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(swap_err(e)),
        }
        fs::rename(updated_path(&self.path), &self.path).map_err(swap_err)?;
        fs::remove_file(ready_path(&self.path)).map_err(swap_err)?;

        Ok(())
    }
}
