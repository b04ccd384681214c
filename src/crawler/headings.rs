//! Heading extraction from rendered pages
//!
//! Reads all six heading levels from the current document of a page session
//! into an ordered, per-level structure. Empty headings are dropped; every
//! level key is always present, so downstream consumers never need to handle
//! a missing level.

use crate::render::PageSession;
use crate::RenderResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heading tags in level order
pub const HEADING_LEVEL_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// One extracted heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Trimmed, non-empty heading text
    pub text: String,

    /// Heading level, 1 through 6
    pub level: u8,
}

/// All headings of one page, keyed by level tag ("h1".."h6")
///
/// Every level key exists even when the page has no heading at that level.
/// Records within a level keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageHeadings(BTreeMap<String, Vec<HeadingRecord>>);

impl PageHeadings {
    /// Creates a PageHeadings with all six level keys mapped to empty lists
    pub fn empty() -> Self {
        let mut levels = BTreeMap::new();
        for tag in HEADING_LEVEL_TAGS {
            levels.insert(tag.to_string(), Vec::new());
        }
        Self(levels)
    }

    /// The records of one level tag
    pub fn records(&self, tag: &str) -> &[HeadingRecord] {
        self.0.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of headings across all levels
    pub fn total_records(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    fn push(&mut self, tag: &str, record: HeadingRecord) {
        self.0.entry(tag.to_string()).or_default().push(record);
    }
}

impl Default for PageHeadings {
    fn default() -> Self {
        Self::empty()
    }
}

/// Extracts all heading levels from the current page
///
/// The page must already be navigated and settled. For each level 1 through
/// 6, every element of that tag is read in document order; only non-empty
/// trimmed texts are kept.
///
/// # Arguments
///
/// * `page` - The rendered page session
///
/// # Returns
///
/// * `Ok(PageHeadings)` - Extracted headings, all six level keys present
/// * `Err(RenderError)` - A DOM query failed; callers record the page as
///   having no headings and continue
pub async fn extract_headings<P: PageSession>(page: &mut P) -> RenderResult<PageHeadings> {
    let mut headings = PageHeadings::empty();

    for (index, tag) in HEADING_LEVEL_TAGS.iter().enumerate() {
        let level = (index + 1) as u8;
        let texts = page.element_texts(tag).await?;

        for text in texts {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                headings.push(
                    tag,
                    HeadingRecord {
                        text: trimmed.to_string(),
                        level,
                    },
                );
            }
        }

        tracing::debug!("Found {} {} headings", headings.records(tag).len(), tag);
    }

    Ok(headings)
}
