//! Pagination Contract Tests
//!
//! Tests for cursor pagination over a published generation:
//! - find_start lands strictly before the anchor, past-the-end when nothing is
//! - Forward pages are contiguous; backward pages mirror forward pages
//! - Filters narrow every pagination operation consistently

use std::path::Path;
use std::sync::Arc;

use browsedb::browse::{find_start, page_backward, page_forward};
use browsedb::builder::{BuildResult, Builder, RecordSource, SourceRecord};
use browsedb::filter::{self, FilterQuery};
use browsedb::normalize::Normalizer;
use browsedb::store::Generation;
use browsedb::version::VersionedIndex;

// =============================================================================
// Helper Functions
// =============================================================================

struct VecSource(std::vec::IntoIter<SourceRecord>);

impl RecordSource for VecSource {
    fn next_record(&mut self) -> BuildResult<Option<SourceRecord>> {
        Ok(self.0.next())
    }
}

fn build(texts_and_tags: &[(&str, &[(&str, &str)])], dir: &Path) -> Arc<Generation> {
    let records: Vec<SourceRecord> = texts_and_tags
        .iter()
        .map(|(text, tags)| SourceRecord {
            text: text.to_string(),
            key: None,
            filters: tags
                .iter()
                .map(|(f, v)| (f.to_string(), v.to_string()))
                .collect(),
        })
        .collect();

    let dest = dir.join("browse.idx");
    Builder::new()
        .build(&mut VecSource(records.into_iter()), &dest)
        .unwrap();
    VersionedIndex::new(&dest).current().unwrap()
}

fn key(anchor: &str) -> Vec<u8> {
    Normalizer::new().normalize(anchor)
}

const NO_TAGS: &[(&str, &str)] = &[];

// =============================================================================
// Find-Start Tests
// =============================================================================

/// Anchor between keys: greatest position strictly before it.
#[test]
fn test_find_start_between_keys() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("A", NO_TAGS), ("C", NO_TAGS), ("E", NO_TAGS)], dir.path());

    assert_eq!(find_start(&*gen, &key("D"), None).unwrap(), 2);
}

/// An anchor equal to an existing key starts just before it.
#[test]
fn test_find_start_exact_key_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("A", NO_TAGS), ("C", NO_TAGS), ("E", NO_TAGS)], dir.path());

    assert_eq!(find_start(&*gen, &key("C"), None).unwrap(), 1);
}

/// No key below the anchor: past-the-end sentinel, so the follow-up page
/// scan finds nothing.
#[test]
fn test_find_start_before_all_keys_is_past_the_end() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("B", NO_TAGS), ("C", NO_TAGS)], dir.path());

    let start = find_start(&*gen, &key("A"), None).unwrap();
    assert_eq!(start, gen.total_count() + 1);

    let window = page_forward(&*gen, start, 10, None);
    assert!(window.headings.is_empty());
}

/// An anchor past every key starts at the last position.
#[test]
fn test_find_start_after_all_keys() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("A", NO_TAGS), ("C", NO_TAGS)], dir.path());

    assert_eq!(find_start(&*gen, &key("Z"), None).unwrap(), 2);
}

/// With a filter, find_start skips non-matching headings below the anchor.
#[test]
fn test_find_start_respects_filter() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(
        &[
            ("A", &[("inst", "NLA")][..]),
            ("B", &[("inst", "SLV")][..]),
            ("C", &[("inst", "NLA")][..]),
        ],
        dir.path(),
    );
    let compiled = filter::translate(&FilterQuery::term("inst", "NLA"), &gen).unwrap();

    // Position 2 ("B") is filtered out; "A" at position 1 is the start
    assert_eq!(find_start(&*gen, &key("C"), Some(&compiled)).unwrap(), 1);
}

// =============================================================================
// Paging Tests
// =============================================================================

/// Consecutive forward pages cover the index without gaps or overlaps.
#[test]
fn test_forward_pages_contiguous() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(
        &[
            ("a", NO_TAGS),
            ("b", NO_TAGS),
            ("c", NO_TAGS),
            ("d", NO_TAGS),
            ("e", NO_TAGS),
        ],
        dir.path(),
    );

    let mut seen = Vec::new();
    let mut cursor = 1;
    loop {
        let window = page_forward(&*gen, cursor, 2, None);
        if window.headings.is_empty() {
            break;
        }
        assert_eq!(window.start_cursor, cursor);
        seen.extend(window.headings);
        cursor = window.end_cursor + 1;
    }

    assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
}

/// A backward page from a forward page's end returns the same headings,
/// ascending.
#[test]
fn test_backward_mirrors_forward() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(
        &[("a", NO_TAGS), ("b", NO_TAGS), ("c", NO_TAGS), ("d", NO_TAGS)],
        dir.path(),
    );

    let forward = page_forward(&*gen, 2, 2, None);
    assert_eq!(forward.headings, vec!["b", "c"]);
    assert_eq!(forward.end_cursor, 3);

    let backward = page_backward(&*gen, forward.end_cursor, 2, None);
    assert_eq!(backward.headings, forward.headings);
    assert_eq!(backward.start_cursor, 2);
    assert_eq!(backward.end_cursor, 3);
}

/// A short final page reports only what exists.
#[test]
fn test_final_page_short() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("a", NO_TAGS), ("b", NO_TAGS), ("c", NO_TAGS)], dir.path());

    let window = page_forward(&*gen, 3, 10, None);
    assert_eq!(window.headings, vec!["c"]);
    assert_eq!(window.total_in_window, 1);
    assert_eq!(window.start_cursor, 3);
    assert_eq!(window.end_cursor, 3);
}

/// A zero page size yields an empty window anchored at the request.
#[test]
fn test_zero_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("a", NO_TAGS)], dir.path());

    let window = page_forward(&*gen, 1, 0, None);
    assert!(window.headings.is_empty());
    assert_eq!(window.start_cursor, 1);
    assert_eq!(window.end_cursor, 1);
}

/// Filtered forward and backward paging agree on which headings exist.
#[test]
fn test_filtered_paging_symmetric() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(
        &[
            ("a", &[("inst", "NLA")][..]),
            ("b", &[("inst", "SLV")][..]),
            ("c", &[("inst", "NLA")][..]),
            ("d", &[("inst", "NLA")][..]),
        ],
        dir.path(),
    );
    let compiled = filter::translate(&FilterQuery::term("inst", "NLA"), &gen).unwrap();

    let forward = page_forward(&*gen, 1, 10, Some(&compiled));
    assert_eq!(forward.headings, vec!["a", "c", "d"]);
    assert_eq!(forward.end_cursor, 4);

    let backward = page_backward(&*gen, 4, 10, Some(&compiled));
    assert_eq!(backward.headings, forward.headings);
    assert_eq!(backward.start_cursor, 1);
}

/// Paging from beyond the last rowid returns an empty window.
#[test]
fn test_forward_past_the_end_empty() {
    let dir = tempfile::tempdir().unwrap();
    let gen = build(&[("a", NO_TAGS), ("b", NO_TAGS)], dir.path());

    let window = page_forward(&*gen, gen.total_count() + 1, 5, None);
    assert!(window.headings.is_empty());
    assert_eq!(window.total_in_window, 0);
}
