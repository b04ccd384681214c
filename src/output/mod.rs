//! Output module for the persisted crawl summary
//!
//! Defines the serde shape of the final JSON document and writes it
//! atomically: the document is serialized to a temporary file next to the
//! destination and renamed into place, so a reader can never observe a
//! partial summary.

use crate::crawler::PageHeadings;
use crate::sitemap::SitemapAnalysis;
use crate::ScoutError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Effective crawl delay recorded in the summary
///
/// Readers must tolerate both a number and the literal "Not specified"; the
/// writer emits the resolved number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrawlDelay {
    Seconds(f64),
    Text(String),
}

impl CrawlDelay {
    /// The literal used when no delay was resolved
    pub fn not_specified() -> Self {
        CrawlDelay::Text("Not specified".to_string())
    }
}

/// Verdict for one tested section path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathVerdict {
    Allowed,
    Disallowed,
}

/// Configuration echo in the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfigSummary {
    pub max_depth: u32,
    pub max_pages_per_section: u32,
    pub crawl_delay: CrawlDelay,
}

/// Aggregate counters in the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub total_pages: usize,
    pub sections_crawled: usize,
}

/// Sitemap findings in the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapSummary {
    /// Sitemap URLs advertised by robots.txt, in order of appearance
    pub urls: Vec<String>,

    /// Per-URL analysis result
    pub analysis: BTreeMap<String, SitemapAnalysis>,
}

/// The final persisted artifact of one crawl run
///
/// Built once by the orchestrator after every section completes; never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub crawl_config: CrawlConfigSummary,
    pub crawl_stats: CrawlStats,
    pub sitemaps: SitemapSummary,

    /// Verdict for every configured candidate path, crawled or not
    pub tested_paths: BTreeMap<String, PathVerdict>,

    /// Section path -> visited URL -> headings
    pub extracted_headings: BTreeMap<String, BTreeMap<String, PageHeadings>>,
}

/// Writes the summary document atomically
///
/// # Arguments
///
/// * `summary` - The assembled crawl summary
/// * `path` - Destination path of the JSON document
///
/// # Returns
///
/// * `Ok(())` - The document was written and renamed into place
/// * `Err(ScoutError)` - Serialization or filesystem failure
pub fn write_summary(summary: &CrawlSummary, path: &Path) -> Result<(), ScoutError> {
    let json = serde_json::to_string_pretty(summary)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> CrawlSummary {
        let mut analysis = BTreeMap::new();
        analysis.insert(
            "https://x/sitemap.xml".to_string(),
            SitemapAnalysis::Sitemap {
                count: 3,
                sample_urls: vec!["https://x/p1".to_string()],
            },
        );

        let mut tested_paths = BTreeMap::new();
        tested_paths.insert("/math".to_string(), PathVerdict::Allowed);
        tested_paths.insert("/api/internal".to_string(), PathVerdict::Disallowed);

        let mut section_pages = BTreeMap::new();
        section_pages.insert("https://x/math".to_string(), PageHeadings::empty());
        let mut extracted_headings = BTreeMap::new();
        extracted_headings.insert("/math".to_string(), section_pages);

        CrawlSummary {
            crawl_config: CrawlConfigSummary {
                max_depth: 2,
                max_pages_per_section: 1,
                crawl_delay: CrawlDelay::Seconds(2.0),
            },
            crawl_stats: CrawlStats {
                total_pages: 1,
                sections_crawled: 1,
            },
            sitemaps: SitemapSummary {
                urls: vec!["https://x/sitemap.xml".to_string()],
                analysis,
            },
            tested_paths,
            extracted_headings,
        }
    }

    #[test]
    fn test_summary_field_names() {
        let json = serde_json::to_value(sample_summary()).unwrap();

        assert_eq!(json["crawl_config"]["max_depth"], 2);
        assert_eq!(json["crawl_config"]["max_pages_per_section"], 1);
        assert_eq!(json["crawl_config"]["crawl_delay"], 2.0);
        assert_eq!(json["crawl_stats"]["total_pages"], 1);
        assert_eq!(json["crawl_stats"]["sections_crawled"], 1);
        assert_eq!(json["sitemaps"]["urls"][0], "https://x/sitemap.xml");
        assert_eq!(
            json["sitemaps"]["analysis"]["https://x/sitemap.xml"]["type"],
            "sitemap"
        );
        assert_eq!(json["tested_paths"]["/math"], "Allowed");
        assert_eq!(json["tested_paths"]["/api/internal"], "Disallowed");
        assert!(json["extracted_headings"]["/math"]["https://x/math"]["h1"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_crawl_delay_tolerates_both_forms() {
        let number: CrawlDelay = serde_json::from_str("2.5").unwrap();
        assert_eq!(number, CrawlDelay::Seconds(2.5));

        let text: CrawlDelay = serde_json::from_str("\"Not specified\"").unwrap();
        assert_eq!(text, CrawlDelay::not_specified());
    }

    #[test]
    fn test_write_summary_is_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl_results.json");

        write_summary(&sample_summary(), &path).unwrap();

        // The temp file is gone, the destination parses back
        assert!(!dir.path().join("crawl_results.json.tmp").exists());
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: CrawlSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.crawl_stats.total_pages, 1);
    }
}
