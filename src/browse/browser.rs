//! Browse facade
//!
//! One `Browser` per configured browse source. Each query pins one
//! generation up front (opportunistically swapping first), translates the
//! filter query against that generation, pages, and enriches the window
//! into `BrowseItem`s.

use std::sync::Arc;

use super::bib::BibliographicIndex;
use super::engine::{self, BrowseWindow};
use super::errors::QueryResult;
use super::items::{BrowseItem, BrowseList};
use crate::authority::AuthorityResolver;
use crate::filter::{self, FilterQuery};
use crate::normalize::Normalizer;
use crate::version::VersionedIndex;

/// Paging direction relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Browse queries over one source's versioned index
pub struct Browser {
    index: Arc<VersionedIndex>,
    authority: AuthorityResolver,
    normalizer: Normalizer,
}

impl Browser {
    pub fn new(
        index: Arc<VersionedIndex>,
        authority: AuthorityResolver,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            index,
            authority,
            normalizer,
        }
    }

    /// Explicit reload signal: swap in a freshly built snapshot if one is
    /// ready, and forward the signal to the authority backend.
    pub fn force_reload(&self) -> QueryResult<()> {
        self.index.reopen_if_updated()?;
        self.authority.reopen_if_updated()?;
        Ok(())
    }

    /// Cursor to start browsing from for an anchor string: the greatest
    /// position strictly before the anchor's key, or past-the-end when
    /// none exists.
    pub fn get_start(&self, anchor: &str, filter: Option<&FilterQuery>) -> QueryResult<usize> {
        self.index.reopen_if_updated()?;
        let gen = self.index.current()?;

        let compiled = filter.and_then(|q| filter::translate(q, &gen));
        let key = self.normalizer.normalize(anchor);

        Ok(engine::find_start(&*gen, &key, compiled.as_ref())?)
    }

    /// One page of enriched browse items from `cursor` in `direction`.
    ///
    /// Negative cursors clamp to 0. The whole page, filters included,
    /// observes a single generation.
    pub fn get_page(
        &self,
        bib: &dyn BibliographicIndex,
        cursor: i64,
        direction: Direction,
        page_size: usize,
        filter: Option<&FilterQuery>,
        extra_fields: &[String],
    ) -> QueryResult<BrowseList> {
        self.index.reopen_if_updated()?;
        let gen = self.index.current()?;

        let compiled = filter.and_then(|q| filter::translate(q, &gen));
        let cursor = cursor.max(0) as usize;

        let window: BrowseWindow = match direction {
            Direction::Forward => {
                engine::page_forward(&*gen, cursor, page_size, compiled.as_ref())
            }
            Direction::Backward => {
                engine::page_backward(&*gen, cursor, page_size, compiled.as_ref())
            }
        };

        let mut items = Vec::with_capacity(window.headings.len());
        for heading in &window.headings {
            items.push(self.populate_item(bib, heading, filter, extra_fields)?);
        }

        Ok(BrowseList {
            total_count: window.total_in_window,
            start_cursor: window.start_cursor,
            end_cursor: window.end_cursor,
            items,
        })
    }

    fn populate_item(
        &self,
        bib: &dyn BibliographicIndex,
        heading: &str,
        filter: Option<&FilterQuery>,
        extra_fields: &[String],
    ) -> QueryResult<BrowseItem> {
        let mut item = BrowseItem::new(heading);

        let matches = bib.matching_ids(heading, extra_fields, filter)?;
        item.count = matches.ids.len();
        item.ids = matches.ids;
        item.extras = matches.extras;

        let refs = self.authority.resolve(heading, bib)?;
        item.see_also = refs.see_also;
        item.use_instead = refs.use_instead;
        item.note = refs.note;

        Ok(item)
    }
}
