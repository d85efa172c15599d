//! Snapshot writer and atomic publish
//!
//! The builder writes a complete snapshot to a scratch path, fsyncs it, and
//! publishes by renaming it to `P-updated` and creating the `P-ready` flag.
//! The live snapshot at `P` is never touched; adoption is the version
//! manager's job. Any failure leaves the previous generation serving.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::format::{self, FilterLink, FilterType, FilterValue, Heading, MAGIC};
use super::manifest::SnapshotManifest;
use super::{ready_path, updated_path};

/// Write a complete snapshot file at `path`.
///
/// Headings must already be in final rowid order; rows are persisted in the
/// order given. The file is fsynced before returning.
pub fn write_snapshot(
    path: &Path,
    manifest: &SnapshotManifest,
    headings: &[Heading],
    filter_types: &[FilterType],
    filter_values: &[FilterValue],
    filter_links: &[FilterLink],
) -> StoreResult<()> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut w = BufWriter::new(file);

    w.write_all(MAGIC).map_err(|e| StoreError::io(path, e))?;
    format::write_record(&mut w, path, &manifest.to_json())?;

    for heading in headings {
        format::write_record(&mut w, path, &heading.encode())?;
    }
    for ft in filter_types {
        format::write_record(&mut w, path, &ft.encode())?;
    }
    for fv in filter_values {
        format::write_record(&mut w, path, &fv.encode())?;
    }
    for link in filter_links {
        format::write_record(&mut w, path, &link.encode())?;
    }

    let file = w
        .into_inner()
        .map_err(|e| StoreError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| StoreError::io(path, e))?;

    Ok(())
}

/// Publish a written snapshot: move the scratch file to `dest-updated` and
/// raise the `dest-ready` flag. Atomic with respect to readers; the swap
/// into `dest` itself happens in the version manager.
pub fn publish(scratch: &Path, dest: &Path) -> StoreResult<()> {
    let updated = updated_path(dest);
    let ready = ready_path(dest);

    fs::rename(scratch, &updated).map_err(|e| StoreError::io(&updated, e))?;

    let flag = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&ready)
        .map_err(|e| StoreError::io(&ready, e))?;
    flag.sync_all().map_err(|e| StoreError::io(&ready, e))?;

    if let Some(dir) = dest.parent() {
        fsync_dir(dir)?;
    }

    Ok(())
}

/// fsync a directory so renames and flag creation are durable.
fn fsync_dir(dir: &Path) -> StoreResult<()> {
    let handle = File::open(dir).map_err(|e| StoreError::io(dir, e))?;
    handle.sync_all().map_err(|e| StoreError::io(dir, e))
}
