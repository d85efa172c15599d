//! Browse End-to-End Tests
//!
//! Full path through the facade: build and publish a snapshot, then browse
//! it with a bibliographic index and an authority index standing in as
//! fixtures:
//! - Anchored start plus paged windows with boundary cursors
//! - Items enriched with record ids, counts, and cross-references
//! - Explicit reload swaps a rebuilt snapshot under the browser

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use browsedb::authority::{
    AuthorityDoc, AuthorityFields, AuthorityIndex, AuthorityResolver, AuthorityResult,
};
use browsedb::browse::{
    BibError, BibMatches, BibliographicIndex, Browser, Direction,
};
use browsedb::builder::{BuildResult, Builder, RecordSource, SourceRecord};
use browsedb::filter::FilterQuery;
use browsedb::normalize::Normalizer;
use browsedb::version::VersionedIndex;

// =============================================================================
// Fixtures
// =============================================================================

struct VecSource(std::vec::IntoIter<SourceRecord>);

impl RecordSource for VecSource {
    fn next_record(&mut self) -> BuildResult<Option<SourceRecord>> {
        Ok(self.0.next())
    }
}

fn publish(records: &[(&str, &[(&str, &str)])], dest: &Path) {
    let records: Vec<SourceRecord> = records
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
    Builder::new()
        .build(&mut VecSource(records.into_iter()), dest)
        .unwrap();
}

/// Bibliographic index serving fixed record ids per heading.
struct FixtureBib {
    ids: HashMap<String, Vec<String>>,
}

impl FixtureBib {
    fn new(entries: &[(&str, &[&str])]) -> Self {
        Self {
            ids: entries
                .iter()
                .map(|(heading, ids)| {
                    (
                        heading.to_string(),
                        ids.iter().map(|id| id.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl BibliographicIndex for FixtureBib {
    fn matching_ids(
        &self,
        heading: &str,
        extra_fields: &[String],
        _filter: Option<&FilterQuery>,
    ) -> Result<BibMatches, BibError> {
        let ids = self.ids.get(heading).cloned().unwrap_or_default();
        let mut extras = HashMap::new();
        for field in extra_fields {
            extras.insert(field.clone(), vec![format!("{} of {}", field, heading)]);
        }
        Ok(BibMatches { ids, extras })
    }

    fn record_count(&self, heading: &str) -> Result<usize, BibError> {
        Ok(self.ids.get(heading).map_or(0, Vec::len))
    }
}

/// Authority index serving fixed preferred and variant records.
#[derive(Default)]
struct FixtureAuthority {
    preferred: HashMap<String, AuthorityDoc>,
    variants: HashMap<String, Vec<AuthorityDoc>>,
}

impl AuthorityIndex for FixtureAuthority {
    fn preferred_record(&self, heading: &str) -> AuthorityResult<Option<AuthorityDoc>> {
        Ok(self.preferred.get(heading).cloned())
    }

    fn redirect_targets(&self, variant: &str, limit: usize) -> AuthorityResult<Vec<AuthorityDoc>> {
        let mut docs = self.variants.get(variant).cloned().unwrap_or_default();
        docs.truncate(limit);
        Ok(docs)
    }
}

fn browser(dest: &Path, authority: FixtureAuthority) -> Browser {
    Browser::new(
        Arc::new(VersionedIndex::new(dest)),
        AuthorityResolver::new(Arc::new(authority), AuthorityFields::default()),
        Normalizer::new(),
    )
}

fn doc(field: &str, values: &[&str]) -> AuthorityDoc {
    let mut fields = HashMap::new();
    fields.insert(
        field.to_string(),
        values.iter().map(|v| v.to_string()).collect(),
    );
    AuthorityDoc::new(fields)
}

// =============================================================================
// Anchored Browse Tests
// =============================================================================

/// A catalog of Adams/Baker/Baker/Clark collapses to three headings; the
/// anchored page starts one position before the anchor.
#[test]
fn test_anchored_browse_window() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(
        &[
            ("Adams, J.", &[]),
            ("Baker, T.", &[]),
            ("Baker, T", &[]),
            ("Clark, R.", &[]),
        ],
        &dest,
    );

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[
        ("Adams, J.", &["b1"]),
        ("Baker, T.", &["b2", "b3"]),
        ("Clark, R.", &["b4"]),
    ]);

    let start = browser.get_start("Baker", None).unwrap();
    assert_eq!(start, 1);

    let page = browser
        .get_page(&bib, start as i64, Direction::Forward, 2, None, &[])
        .unwrap();

    assert_eq!(page.start_cursor, 1);
    assert_eq!(page.end_cursor, 2);
    assert_eq!(page.total_count, 2);

    let headings: Vec<&str> = page.items.iter().map(|i| i.heading.as_str()).collect();
    assert_eq!(headings, vec!["Adams, J.", "Baker, T."]);
    assert_eq!(page.items[1].ids, vec!["b2", "b3"]);
    assert_eq!(page.items[1].count, 2);
}

/// Backward paging from a cursor returns the preceding window, ascending.
#[test]
fn test_backward_page() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(
        &[("Adams, J.", &[]), ("Baker, T.", &[]), ("Clark, R.", &[])],
        &dest,
    );

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);

    let page = browser
        .get_page(&bib, 3, Direction::Backward, 2, None, &[])
        .unwrap();

    let headings: Vec<&str> = page.items.iter().map(|i| i.heading.as_str()).collect();
    assert_eq!(headings, vec!["Baker, T.", "Clark, R."]);
    assert_eq!(page.start_cursor, 2);
    assert_eq!(page.end_cursor, 3);
}

/// Negative cursors clamp to the start of the index.
#[test]
fn test_negative_cursor_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Adams, J.", &[]), ("Baker, T.", &[])], &dest);

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);

    let page = browser
        .get_page(&bib, -5, Direction::Forward, 10, None, &[])
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].heading, "Adams, J.");
}

/// An anchor below every heading yields an empty window, not a wrap-around.
#[test]
fn test_anchor_below_everything_yields_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Baker, T.", &[]), ("Clark, R.", &[])], &dest);

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);

    let start = browser.get_start("Aardvark", None).unwrap();
    let page = browser
        .get_page(&bib, start as i64, Direction::Forward, 10, None, &[])
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
}

// =============================================================================
// Enrichment Tests
// =============================================================================

/// Cross-references ride along on items; dead references are suppressed.
#[test]
fn test_items_carry_cross_references() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Clemens, Samuel", &[])], &dest);

    let mut authority = FixtureAuthority::default();
    let mut fields = HashMap::new();
    fields.insert(
        "see_also".to_string(),
        vec!["Twain, Mark".to_string(), "Ghost".to_string()],
    );
    fields.insert("note".to_string(), vec!["American author".to_string()]);
    authority
        .preferred
        .insert("Clemens, Samuel".to_string(), AuthorityDoc::new(fields));

    let browser = browser(&dest, authority);
    let bib = FixtureBib::new(&[
        ("Clemens, Samuel", &["b1"]),
        ("Twain, Mark", &["b2"]),
    ]);

    let page = browser
        .get_page(&bib, 1, Direction::Forward, 1, None, &[])
        .unwrap();

    let item = &page.items[0];
    assert_eq!(item.see_also, vec!["Twain, Mark"]);
    assert_eq!(item.note, "American author");
    assert!(item.use_instead.is_empty());
}

/// A variant heading points to the preferred form to use instead.
#[test]
fn test_variant_heading_use_instead() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Twain, M.", &[])], &dest);

    let mut authority = FixtureAuthority::default();
    authority
        .variants
        .insert("Twain, M.".to_string(), vec![doc("preferred", &["Twain, Mark"])]);

    let browser = browser(&dest, authority);
    let bib = FixtureBib::new(&[("Twain, Mark", &["b1"])]);

    let page = browser
        .get_page(&bib, 1, Direction::Forward, 1, None, &[])
        .unwrap();

    assert_eq!(page.items[0].use_instead, vec!["Twain, Mark"]);
}

/// Requested extra fields come back one entry per field.
#[test]
fn test_extra_fields_populated() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Adams, J.", &[])], &dest);

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[("Adams, J.", &["b1"])]);

    let page = browser
        .get_page(
            &bib,
            1,
            Direction::Forward,
            1,
            None,
            &["format".to_string()],
        )
        .unwrap();

    assert_eq!(
        page.items[0].extras.get("format").map(Vec::as_slice),
        Some(&["format of Adams, J.".to_string()][..])
    );
}

// =============================================================================
// Filtered Browse Tests
// =============================================================================

/// A filter narrows the page while cursors stay in index positions.
#[test]
fn test_filtered_browse() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(
        &[
            ("Adams, J.", &[("inst", "NLA")][..]),
            ("Baker, T.", &[("inst", "SLV")][..]),
            ("Clark, R.", &[("inst", "NLA")][..]),
        ],
        &dest,
    );

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);
    let query = FilterQuery::term("inst", "NLA");

    let page = browser
        .get_page(&bib, 1, Direction::Forward, 10, Some(&query), &[])
        .unwrap();

    let headings: Vec<&str> = page.items.iter().map(|i| i.heading.as_str()).collect();
    assert_eq!(headings, vec!["Adams, J.", "Clark, R."]);
    assert_eq!(page.end_cursor, 3);
}

/// A filter naming an unknown field is dropped rather than failing the query.
#[test]
fn test_unknown_filter_field_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Adams, J.", &[("inst", "NLA")][..])], &dest);

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);
    let query = FilterQuery::term("bogus", "X");

    let page = browser
        .get_page(&bib, 1, Direction::Forward, 10, Some(&query), &[])
        .unwrap();

    assert_eq!(page.items.len(), 1);
}

// =============================================================================
// Reload Tests
// =============================================================================

/// An explicit reload swaps a rebuilt snapshot under the browser.
#[test]
fn test_force_reload_serves_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("names.idx");
    publish(&[("Adams, J.", &[])], &dest);

    let browser = browser(&dest, FixtureAuthority::default());
    let bib = FixtureBib::new(&[]);

    let before = browser
        .get_page(&bib, 1, Direction::Forward, 10, None, &[])
        .unwrap();
    assert_eq!(before.items.len(), 1);

    publish(&[("Adams, J.", &[]), ("Baker, T.", &[])], &dest);
    browser.force_reload().unwrap();

    let after = browser
        .get_page(&bib, 1, Direction::Forward, 10, None, &[])
        .unwrap();
    assert_eq!(after.items.len(), 2);
}
