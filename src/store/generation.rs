//! One loaded, immutable index generation
//!
//! A `Generation` is the in-memory form of a snapshot: the rowid-ordered
//! heading table plus the lookup structures the query paths need. Lookups
//! are derived at open from the persisted tables and never persisted
//! themselves:
//!
//! - key order: binary search over the sorted heading keys
//! - filter-type dictionary: name → type id
//! - filter-value dictionary: (type id, value) → value id
//! - link index: value id → sorted set of heading ids
//!
//! # Invariants
//!
//! - `rowid = position + 1`; rowid order is key order, ties in assignment
//!   order (verified at open)
//! - A generation never changes after open; a rebuild is a new `Generation`

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::format::{self, FilterLink, FilterType, FilterValue, Heading, MAGIC};
use super::manifest::SnapshotManifest;

/// One complete, immutable build of the browse index
#[derive(Debug)]
pub struct Generation {
    manifest: SnapshotManifest,
    /// Headings in rowid order; `rowid = index + 1`
    headings: Vec<Heading>,
    /// Filter field name → type id
    filter_types: HashMap<String, u32>,
    /// (type id, value) → filter value id
    filter_values: HashMap<(u32, String), u32>,
    /// Filter value id → heading ids carrying it
    links: HashMap<u32, BTreeSet<u32>>,
}

impl Generation {
    /// Open and fully load the snapshot at `path`.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let mut r = BufReader::new(file);

        let mut magic = [0u8; 8];
        r.read_exact(&mut magic).map_err(|e| StoreError::io(path, e))?;
        if &magic != MAGIC {
            return Err(StoreError::corrupt(path, "bad magic bytes"));
        }

        let manifest = SnapshotManifest::from_json(&format::read_record(&mut r, path)?, path)?;

        let mut headings = Vec::with_capacity(manifest.heading_count as usize);
        for _ in 0..manifest.heading_count {
            let row = Heading::decode(&format::read_record(&mut r, path)?, path)?;
            if let Some(prev) = headings.last() {
                let prev: &Heading = prev;
                if prev.key > row.key {
                    return Err(StoreError::corrupt(path, "headings out of key order"));
                }
            }
            headings.push(row);
        }

        let mut filter_types = Vec::with_capacity(manifest.filter_type_count as usize);
        for _ in 0..manifest.filter_type_count {
            filter_types.push(FilterType::decode(&format::read_record(&mut r, path)?, path)?);
        }

        let mut filter_values = Vec::with_capacity(manifest.filter_value_count as usize);
        for _ in 0..manifest.filter_value_count {
            filter_values.push(FilterValue::decode(&format::read_record(&mut r, path)?, path)?);
        }

        let mut filter_links = Vec::with_capacity(manifest.filter_link_count as usize);
        for _ in 0..manifest.filter_link_count {
            filter_links.push(FilterLink::decode(&format::read_record(&mut r, path)?, path)?);
        }

        Self::assemble(path, manifest, headings, filter_types, filter_values, filter_links)
    }

    /// Build the derived lookup structures from loaded tables.
    pub(crate) fn assemble(
        path: &Path,
        manifest: SnapshotManifest,
        headings: Vec<Heading>,
        filter_types: Vec<FilterType>,
        filter_values: Vec<FilterValue>,
        filter_links: Vec<FilterLink>,
    ) -> StoreResult<Self> {
        let heading_ids: BTreeSet<u32> = headings.iter().map(|h| h.id).collect();
        if heading_ids.len() != headings.len() {
            return Err(StoreError::corrupt(path, "duplicate heading ids"));
        }

        let mut types = HashMap::with_capacity(filter_types.len());
        for ft in filter_types {
            types.insert(ft.name, ft.id);
        }

        let mut values = HashMap::with_capacity(filter_values.len());
        for fv in filter_values {
            values.insert((fv.type_id, fv.value), fv.id);
        }

        let value_ids: BTreeSet<u32> = values.values().copied().collect();

        let mut links: HashMap<u32, BTreeSet<u32>> = HashMap::new();
        for link in filter_links {
            if !heading_ids.contains(&link.heading_id) || !value_ids.contains(&link.filter_value_id) {
                return Err(StoreError::corrupt(path, "filter link references unknown row"));
            }
            links
                .entry(link.filter_value_id)
                .or_default()
                .insert(link.heading_id);
        }

        Ok(Self {
            manifest,
            headings,
            filter_types: types,
            filter_values: values,
            links,
        })
    }

    /// Number of headings in this generation (computed once at open)
    pub fn total_count(&self) -> usize {
        self.headings.len()
    }

    /// The manifest this generation was opened from
    pub fn manifest(&self) -> &SnapshotManifest {
        &self.manifest
    }

    /// Heading at a 1-based rowid
    pub fn heading_at(&self, rowid: usize) -> Option<&Heading> {
        if rowid == 0 {
            return None;
        }
        self.headings.get(rowid - 1)
    }

    /// Type id for a filter field name
    pub fn filter_type_id(&self, name: &str) -> Option<u32> {
        self.filter_types.get(name).copied()
    }

    /// Value id for a (type, value) pair
    pub fn filter_value_id(&self, type_id: u32, value: &str) -> Option<u32> {
        self.filter_values.get(&(type_id, value.to_string())).copied()
    }

    /// Heading ids linked to a filter value
    pub fn linked_headings(&self, filter_value_id: u32) -> Option<&BTreeSet<u32>> {
        self.links.get(&filter_value_id)
    }

    /// First 0-based position whose key is `>= key`
    pub(crate) fn lower_bound(&self, key: &[u8]) -> usize {
        self.headings.partition_point(|h| h.key.as_slice() < key)
    }

    /// All headings in rowid order
    pub(crate) fn headings(&self) -> &[Heading] {
        &self.headings
    }
}
