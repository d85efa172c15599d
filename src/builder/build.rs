//! Destination build algorithm
//!
//! Both record-source variants converge here: stream records, dedup by sort
//! key, resolve filter dictionaries, then sort, write, and publish a
//! snapshot next to the destination path.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use super::errors::BuildResult;
use super::lru::LruCache;
use super::source::RecordSource;
use crate::normalize::{truncate_term, Normalizer};
use crate::observe::Logger;
use crate::store::{
    self, FilterLink, FilterType, FilterValue, Heading, SnapshotManifest,
};

/// Buffered link inserts are flushed into the working set at this size.
pub const LINK_BATCH_SIZE: usize = 500_000;

/// Dedup caches hold this many recently-seen entries.
const CACHE_CAPACITY: usize = 1000;

/// Records between progress log lines
const PROGRESS_INTERVAL: u64 = 500_000;

/// Counters reported by a completed build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: u64,
    pub headings: u64,
    pub filter_types: u64,
    pub filter_values: u64,
    pub filter_links: u64,
    pub skipped_tags: u64,
}

/// Offline index builder.
///
/// Owns its destination exclusively until publish; a failed build leaves
/// whatever generation is currently serving untouched.
pub struct Builder {
    normalizer: Normalizer,
    link_batch_size: usize,
}

impl Builder {
    /// Builder using the default normalizer
    pub fn new() -> Self {
        Self::with_normalizer(Normalizer::new())
    }

    /// Builder using a source-specific normalizer (custom dropped chars)
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            link_batch_size: LINK_BATCH_SIZE,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_link_batch_size(mut self, size: usize) -> Self {
        self.link_batch_size = size.max(1);
        self
    }

    /// Consume `source` and publish a snapshot next to `dest`.
    ///
    /// The new generation lands at `dest-updated` with the `dest-ready` flag
    /// raised; the version manager swaps it in. Returns build counters.
    pub fn build(&self, source: &mut dyn RecordSource, dest: &Path) -> BuildResult<BuildStats> {
        let mut headings: Vec<Heading> = Vec::new();
        let mut key_table: HashMap<Vec<u8>, u32> = HashMap::new();
        let mut key_cache: LruCache<Vec<u8>, u32> = LruCache::new(CACHE_CAPACITY);

        let mut type_rows: Vec<FilterType> = Vec::new();
        let mut type_table: HashMap<String, u32> = HashMap::new();

        let mut value_rows: Vec<FilterValue> = Vec::new();
        let mut value_table: HashMap<(u32, String), u32> = HashMap::new();
        let mut value_cache: LruCache<(u32, String), u32> = LruCache::new(CACHE_CAPACITY);

        let mut links: BTreeSet<FilterLink> = BTreeSet::new();
        let mut link_buffer: Vec<FilterLink> = Vec::new();

        let mut records: u64 = 0;

        while let Some(record) = source.next_record()? {
            records += 1;

            let text = truncate_term(&record.text);
            let key = match record.key {
                Some(key) => key,
                None => self.normalizer.normalize(text),
            };

            // Dedup by key: first-seen text wins, later occurrences only
            // contribute filter tags
            let heading_id = match key_cache.get(&key) {
                Some(id) => id,
                None => match key_table.get(&key) {
                    Some(id) => {
                        let id = *id;
                        key_cache.insert(key.clone(), id);
                        id
                    }
                    None => {
                        let id = (headings.len() + 1) as u32;
                        headings.push(Heading {
                            id,
                            key: key.clone(),
                            text: text.to_string(),
                        });
                        key_table.insert(key.clone(), id);
                        key_cache.insert(key, id);
                        id
                    }
                },
            };

            for (field, value) in record.filters {
                let type_id = match type_table.get(&field) {
                    Some(id) => *id,
                    None => {
                        let id = (type_rows.len() + 1) as u32;
                        type_rows.push(FilterType {
                            id,
                            name: field.clone(),
                        });
                        type_table.insert(field, id);
                        id
                    }
                };

                let value_key = (type_id, value);
                let value_id = match value_cache.get(&value_key) {
                    Some(id) => id,
                    None => match value_table.get(&value_key) {
                        Some(id) => {
                            let id = *id;
                            value_cache.insert(value_key, id);
                            id
                        }
                        None => {
                            let id = (value_rows.len() + 1) as u32;
                            value_rows.push(FilterValue {
                                id,
                                type_id,
                                value: value_key.1.clone(),
                            });
                            value_table.insert(value_key.clone(), id);
                            value_cache.insert(value_key, id);
                            id
                        }
                    },
                };

                link_buffer.push(FilterLink {
                    heading_id,
                    filter_value_id: value_id,
                });
                if link_buffer.len() >= self.link_batch_size {
                    Logger::info(
                        "BUILD_LINK_BATCH",
                        &[("buffered", &link_buffer.len().to_string())],
                    );
                    links.extend(link_buffer.drain(..));
                }
            }

            if records % PROGRESS_INTERVAL == 0 {
                Logger::info(
                    "BUILD_PROGRESS",
                    &[
                        ("records", &records.to_string()),
                        ("headings", &headings.len().to_string()),
                    ],
                );
            }
        }

        links.extend(link_buffer.drain(..));

        // Materialize the rowid order: stable sort by key, ties keep
        // assignment order
        headings.sort_by(|a, b| a.key.cmp(&b.key));

        let link_rows: Vec<FilterLink> = links.into_iter().collect();
        let manifest = SnapshotManifest::new(
            headings.len() as u64,
            type_rows.len() as u64,
            value_rows.len() as u64,
            link_rows.len() as u64,
        );

        let scratch = store::tmp_path(dest);
        let result = store::write_snapshot(
            &scratch,
            &manifest,
            &headings,
            &type_rows,
            &value_rows,
            &link_rows,
        )
        .and_then(|_| store::publish(&scratch, dest));

        if let Err(e) = result {
            // Abort cleanly: no partial publish
            Logger::error(
                "BUILD_ABORTED",
                &[
                    ("dest", &dest.display().to_string()),
                    ("error", &e.to_string()),
                ],
            );
            let _ = fs::remove_file(&scratch);
            return Err(e.into());
        }

        let stats = BuildStats {
            records,
            headings: headings.len() as u64,
            filter_types: type_rows.len() as u64,
            filter_values: value_rows.len() as u64,
            filter_links: link_rows.len() as u64,
            skipped_tags: source.skipped_tags(),
        };

        Logger::info(
            "BUILD_COMPLETE",
            &[
                ("dest", &dest.display().to_string()),
                ("headings", &stats.headings.to_string()),
                ("links", &stats.filter_links.to_string()),
                ("records", &stats.records.to_string()),
            ],
        );

        Ok(stats)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
