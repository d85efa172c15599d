//! Assembled browse results
//!
//! Ephemeral per-query shapes handed back to the request shell; serialized
//! with the field names browse clients expect.

use std::collections::HashMap;

use serde::Serialize;

/// One heading enriched with bibliographic matches and cross-references
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseItem {
    pub heading: String,
    pub ids: Vec<String>,
    pub extras: HashMap<String, Vec<String>>,
    pub see_also: Vec<String>,
    pub use_instead: Vec<String>,
    pub note: String,
    pub count: usize,
}

impl BrowseItem {
    /// Bare item for a heading, before enrichment
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            ids: Vec::new(),
            extras: HashMap::new(),
            see_also: Vec::new(),
            use_instead: Vec::new(),
            note: String::new(),
            count: 0,
        }
    }
}

/// One page of assembled browse items with its boundary cursors
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseList {
    /// Number of items in this page
    pub total_count: usize,
    pub start_cursor: usize,
    pub end_cursor: usize,
    pub items: Vec<BrowseItem>,
}
