//! Snapshot manifest
//!
//! The first record of every snapshot file: format version, creation
//! timestamp, and the row count of each table. Row counts drive the
//! sequential reader; totals are served from here rather than recounted.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Current snapshot format version
pub const FORMAT_VERSION: u32 = 1;

/// Metadata describing one persisted generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotManifest {
    pub format_version: u32,
    /// RFC3339 build timestamp
    pub created_at: String,
    pub heading_count: u64,
    pub filter_type_count: u64,
    pub filter_value_count: u64,
    pub filter_link_count: u64,
}

impl SnapshotManifest {
    /// Manifest for a freshly built snapshot, stamped now.
    pub fn new(
        heading_count: u64,
        filter_type_count: u64,
        filter_value_count: u64,
        filter_link_count: u64,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            created_at: Utc::now().to_rfc3339(),
            heading_count,
            filter_type_count,
            filter_value_count,
            filter_link_count,
        }
    }

    pub(crate) fn to_json(&self) -> Vec<u8> {
        // Serialization of a plain struct with string/number fields cannot fail
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub(crate) fn from_json(payload: &[u8], path: &std::path::Path) -> StoreResult<Self> {
        let manifest: SnapshotManifest = serde_json::from_slice(payload)
            .map_err(|e| StoreError::corrupt(path, format!("bad manifest: {}", e)))?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(StoreError::corrupt(
                path,
                format!("unsupported snapshot format version {}", manifest.format_version),
            ));
        }
        Ok(manifest)
    }
}
