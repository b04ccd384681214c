//! Crawler module - heading extraction, section traversal, orchestration
//!
//! This module contains the core crawling logic:
//! - Heading extraction from rendered pages
//! - Bounded per-section traversal with depth, budget, and visited limits
//! - Overall crawl orchestration and summary assembly

mod headings;
mod orchestrator;
mod section;

pub use headings::{extract_headings, HeadingRecord, PageHeadings, HEADING_LEVEL_TAGS};
pub use orchestrator::{build_http_client, Orchestrator};
pub use section::{SectionCrawlOptions, SectionCrawler, SectionReport};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::render::RenderBackend;
use crate::ScoutError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Resolve the robots.txt policy (degrading to permissive on failure)
/// 2. Analyze every advertised sitemap
/// 3. Test each configured section path and crawl the allowed ones
/// 4. Assemble and persist the summary document
///
/// # Arguments
///
/// * `config` - The validated crawler configuration
/// * `backend` - The render backend used for page visits
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The persisted summary
/// * `Err(ScoutError)` - Setup or persistence failed
pub async fn crawl<B: RenderBackend>(
    config: &Config,
    backend: &B,
) -> Result<CrawlSummary, ScoutError> {
    Orchestrator::new(config, backend)?.run().await
}
