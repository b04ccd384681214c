//! Sitemap discovery and analysis
//!
//! This module fetches sitemap URLs advertised by robots.txt and classifies
//! each one as a sitemap index (pointing at child sitemaps) or a leaf sitemap
//! (listing page URLs), decompressing gzipped payloads when needed. A failure
//! on one sitemap never affects the analysis of its siblings.

mod analyzer;

pub use analyzer::{analyze_sitemap, classify_sitemap};

use serde::{Deserialize, Serialize};

/// Maximum number of page URLs captured from a leaf sitemap
pub const SAMPLE_URL_LIMIT: usize = 5;

/// Analysis result for one sitemap URL
///
/// The serde shape of this enum is exactly what lands in the persisted
/// summary under `sitemaps.analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SitemapAnalysis {
    /// An index document whose entries are links to other sitemaps
    SitemapIndex {
        /// Number of child sitemap entries
        count: usize,
        /// Every child sitemap URL, in document order
        sitemaps: Vec<String>,
    },

    /// A leaf document listing content page URLs
    Sitemap {
        /// Total number of page URL entries
        count: usize,
        /// At most the first five page URLs, as a representative sample
        sample_urls: Vec<String>,
    },

    /// The sitemap could not be fetched or parsed
    Error {
        /// Description of what went wrong
        error: String,
    },
}
