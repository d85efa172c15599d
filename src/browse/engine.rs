//! Cursor pagination over one generation
//!
//! Rowids are 1-based positions in the sorted heading order and double as
//! pagination cursors. All operations here are read-only against a single
//! generation.

use std::thread;
use std::time::Duration;

use crate::filter::CompiledFilter;
use crate::observe::Logger;
use crate::store::{Generation, StoreResult};

/// Fetch attempts before a paging query degrades to an empty window
const PAGE_ATTEMPTS: u32 = 3;

/// Pause between fetch attempts
const RETRY_DELAY: Duration = Duration::from_millis(50);

/// One page of headings with its boundary cursors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseWindow {
    pub start_cursor: usize,
    pub end_cursor: usize,
    /// Number of headings in this window
    pub total_in_window: usize,
    /// Heading display texts in ascending rowid order
    pub headings: Vec<String>,
}

impl BrowseWindow {
    fn empty_at(cursor: usize) -> Self {
        Self {
            start_cursor: cursor,
            end_cursor: cursor,
            total_in_window: 0,
            headings: Vec::new(),
        }
    }
}

/// Seam between pagination and the backing generation; lets the retry path
/// be exercised against a failing source.
pub trait HeadingSource {
    /// Headings in this generation
    fn total(&self) -> usize;

    /// Greatest rowid whose key is strictly below `key` and which satisfies
    /// the predicate
    fn rowid_before(&self, key: &[u8], filter: Option<&CompiledFilter>)
        -> StoreResult<Option<usize>>;

    /// Up to `limit` matching `(rowid, text)` pairs at rowid ≥ `from`,
    /// ascending
    fn scan_forward(
        &self,
        from: usize,
        limit: usize,
        filter: Option<&CompiledFilter>,
    ) -> StoreResult<Vec<(usize, String)>>;

    /// Up to `limit` matching `(rowid, text)` pairs at rowid ≤ `from`,
    /// descending
    fn scan_backward(
        &self,
        from: usize,
        limit: usize,
        filter: Option<&CompiledFilter>,
    ) -> StoreResult<Vec<(usize, String)>>;
}

impl HeadingSource for Generation {
    fn total(&self) -> usize {
        self.total_count()
    }

    fn rowid_before(
        &self,
        key: &[u8],
        filter: Option<&CompiledFilter>,
    ) -> StoreResult<Option<usize>> {
        let bound = self.lower_bound(key);
        for pos in (0..bound).rev() {
            let heading = &self.headings()[pos];
            if filter.map_or(true, |f| f.matches(heading, self)) {
                return Ok(Some(pos + 1));
            }
        }
        Ok(None)
    }

    fn scan_forward(
        &self,
        from: usize,
        limit: usize,
        filter: Option<&CompiledFilter>,
    ) -> StoreResult<Vec<(usize, String)>> {
        let mut rows = Vec::with_capacity(limit.min(64));
        let start = from.max(1) - 1;

        for (pos, heading) in self.headings().iter().enumerate().skip(start) {
            if rows.len() == limit {
                break;
            }
            if filter.map_or(true, |f| f.matches(heading, self)) {
                rows.push((pos + 1, heading.text.clone()));
            }
        }

        Ok(rows)
    }

    fn scan_backward(
        &self,
        from: usize,
        limit: usize,
        filter: Option<&CompiledFilter>,
    ) -> StoreResult<Vec<(usize, String)>> {
        let mut rows = Vec::with_capacity(limit.min(64));
        let start = from.min(self.total_count());

        for pos in (0..start).rev() {
            if rows.len() == limit {
                break;
            }
            let heading = &self.headings()[pos];
            if filter.map_or(true, |f| f.matches(heading, self)) {
                rows.push((pos + 1, heading.text.clone()));
            }
        }

        Ok(rows)
    }
}

/// Greatest cursor strictly before `anchor_key`, or `total + 1` as a
/// past-the-end sentinel when no matching smaller key exists.
pub fn find_start<S: HeadingSource + ?Sized>(
    source: &S,
    anchor_key: &[u8],
    filter: Option<&CompiledFilter>,
) -> StoreResult<usize> {
    Ok(match source.rowid_before(anchor_key, filter)? {
        Some(rowid) => rowid,
        None => source.total() + 1,
    })
}

/// Page forward from `cursor`: up to `page_size` matching headings at
/// rowid ≥ cursor. `start_cursor` is the requested cursor; `end_cursor` is
/// the last returned rowid, or the request when the window is empty.
pub fn page_forward<S: HeadingSource + ?Sized>(
    source: &S,
    cursor: usize,
    page_size: usize,
    filter: Option<&CompiledFilter>,
) -> BrowseWindow {
    let mut window = BrowseWindow::empty_at(cursor);
    if page_size == 0 {
        return window;
    }

    let rows = match fetch_with_retry(|| source.scan_forward(cursor, page_size, filter)) {
        Some(rows) => rows,
        None => return window,
    };

    if let Some((last_rowid, _)) = rows.last() {
        window.end_cursor = *last_rowid;
    }
    window.total_in_window = rows.len();
    window.headings = rows.into_iter().map(|(_, text)| text).collect();
    window
}

/// Page backward from `cursor`: up to `page_size` matching headings at
/// rowid ≤ cursor, returned in ascending order. `end_cursor` is the
/// requested cursor; `start_cursor` is the lowest returned rowid, or the
/// request when the window is empty.
pub fn page_backward<S: HeadingSource + ?Sized>(
    source: &S,
    cursor: usize,
    page_size: usize,
    filter: Option<&CompiledFilter>,
) -> BrowseWindow {
    let mut window = BrowseWindow::empty_at(cursor);
    if page_size == 0 {
        return window;
    }

    let mut rows = match fetch_with_retry(|| source.scan_backward(cursor, page_size, filter)) {
        Some(rows) => rows,
        None => return window,
    };

    // Collected in descending scan order; present ascending
    rows.reverse();

    if let Some((first_rowid, _)) = rows.first() {
        window.start_cursor = *first_rowid;
    }
    window.total_in_window = rows.len();
    window.headings = rows.into_iter().map(|(_, text)| text).collect();
    window
}

/// Run a fetch, retrying transient failures a bounded number of times.
/// Exhausted retries yield `None`; callers degrade to an empty window.
fn fetch_with_retry<T>(mut fetch: impl FnMut() -> StoreResult<T>) -> Option<T> {
    for attempt in 1..=PAGE_ATTEMPTS {
        match fetch() {
            Ok(value) => return Some(value),
            Err(e) => {
                Logger::warn(
                    "PAGE_RETRY",
                    &[
                        ("attempt", &attempt.to_string()),
                        ("error", &e.to_string()),
                    ],
                );
                thread::sleep(RETRY_DELAY);
            }
        }
    }
    None
}
