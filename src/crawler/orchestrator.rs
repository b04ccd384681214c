//! Crawl orchestration - sequences a whole run
//!
//! The orchestrator resolves the robots.txt policy, analyzes every advertised
//! sitemap, tests each configured section path against the policy, crawls the
//! allowed sections one at a time (opening a fresh render session per
//! section), and assembles the final summary document. It performs the single
//! write of the summary, after every section has returned.

use crate::config::{Config, UserAgentConfig};
use crate::crawler::section::{SectionCrawlOptions, SectionCrawler, SectionReport};
use crate::crawler::PageHeadings;
use crate::output::{
    self, CrawlConfigSummary, CrawlDelay, CrawlStats, CrawlSummary, PathVerdict, SitemapSummary,
};
use crate::render::{PageSession, RenderBackend};
use crate::robots::{fetch_robots, is_allowed, CrawlPolicy};
use crate::sitemap::analyze_sitemap;
use crate::url::join_url;
use crate::ScoutError;
use reqwest::Client;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builds the shared HTTP client with the crawler-identifying user agent
///
/// Used for robots.txt and sitemap retrieval; page content goes through the
/// render backend instead.
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.full_user_agent())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Main crawl orchestrator
pub struct Orchestrator<'a, B: RenderBackend> {
    config: &'a Config,
    backend: &'a B,
    client: Client,
    user_agent: String,
}

impl<'a, B: RenderBackend> Orchestrator<'a, B> {
    /// Creates an orchestrator for one run
    ///
    /// # Arguments
    ///
    /// * `config` - The validated run configuration
    /// * `backend` - The render backend; one page session is opened per
    ///   allowed section
    pub fn new(config: &'a Config, backend: &'a B) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.user_agent)?;
        let user_agent = config.user_agent.full_user_agent();

        Ok(Self {
            config,
            backend,
            client,
            user_agent,
        })
    }

    /// Runs the full crawl sequence and writes the summary document
    ///
    /// Per-sitemap and per-page failures are contained and recorded; a fatal
    /// render backend failure aborts only the affected section. The summary
    /// is always written exactly once, at the end.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - The assembled and persisted summary
    /// * `Err(ScoutError)` - Setup failure (bad base URL) or summary write
    ///   failure
    pub async fn run(&self) -> Result<CrawlSummary, ScoutError> {
        let base_url = Url::parse(&self.config.crawler.base_url)?;

        // Resolve the crawl policy; a missing robots.txt never stops the run
        let policy = match fetch_robots(&self.client, &base_url).await {
            Ok(content) => {
                tracing::info!("robots.txt fetched ({} bytes)", content.len());
                CrawlPolicy::from_content(&content)
            }
            Err(e) => {
                tracing::error!(
                    "Failed to fetch robots.txt, continuing with permissive policy: {}",
                    e
                );
                CrawlPolicy::permissive()
            }
        };

        // The wildcard Crawl-delay takes precedence over the configured default
        let crawl_delay_secs = policy
            .crawl_delay()
            .unwrap_or(self.config.crawler.crawl_delay);
        tracing::info!("Effective crawl delay: {}s", crawl_delay_secs);

        // Analyze every advertised sitemap; failures are isolated per sitemap
        let sitemap_urls: Vec<String> = policy.sitemap_urls().to_vec();
        let mut sitemap_analysis = BTreeMap::new();
        for sitemap_url in &sitemap_urls {
            tracing::info!("Analyzing sitemap {}", sitemap_url);
            let analysis = analyze_sitemap(&self.client, sitemap_url).await;
            sitemap_analysis.insert(sitemap_url.clone(), analysis);
        }

        let options = SectionCrawlOptions {
            max_depth: self.config.crawler.max_depth,
            max_pages: self.config.crawler.max_pages_per_section,
            request_delay: Duration::from_secs_f64(crawl_delay_secs),
            wait_timeout: Duration::from_millis(self.config.render.wait_timeout_ms),
            settle_delay: Duration::from_millis(self.config.render.settle_delay_ms),
        };

        tracing::info!(
            "Crawling with depth {} (max {} pages per section)",
            options.max_depth,
            options.max_pages
        );

        // Test every candidate path; crawl only the allowed ones
        let mut tested_paths = BTreeMap::new();
        let mut extracted_headings: BTreeMap<String, BTreeMap<String, PageHeadings>> =
            BTreeMap::new();

        for section in &self.config.crawler.sections {
            let section_url = join_url(&base_url, section)?;
            let allowed = is_allowed(&policy, section_url.as_str(), &self.user_agent);

            tested_paths.insert(
                section.clone(),
                if allowed {
                    PathVerdict::Allowed
                } else {
                    PathVerdict::Disallowed
                },
            );

            if !allowed {
                tracing::info!("Section {} disallowed by robots.txt, skipping", section);
                continue;
            }

            tracing::info!("Starting section: {}", section);
            let report = self.crawl_one_section(&base_url, section, &options).await;

            if let Some(error) = &report.error {
                tracing::error!("Section {} aborted: {}", section, error);
            }
            extracted_headings.insert(section.clone(), report.pages);
        }

        let total_pages: usize = extracted_headings.values().map(BTreeMap::len).sum();
        let sections_crawled = extracted_headings.len();
        tracing::info!(
            "Crawl complete: {} pages across {} sections",
            total_pages,
            sections_crawled
        );

        let summary = CrawlSummary {
            crawl_config: CrawlConfigSummary {
                max_depth: self.config.crawler.max_depth,
                max_pages_per_section: self.config.crawler.max_pages_per_section,
                crawl_delay: CrawlDelay::Seconds(crawl_delay_secs),
            },
            crawl_stats: CrawlStats {
                total_pages,
                sections_crawled,
            },
            sitemaps: SitemapSummary {
                urls: sitemap_urls,
                analysis: sitemap_analysis,
            },
            tested_paths,
            extracted_headings,
        };

        let results_path = Path::new(&self.config.output.results_path);
        output::write_summary(&summary, results_path)?;
        tracing::info!("Results saved to {}", results_path.display());

        Ok(summary)
    }

    /// Crawls one allowed section in a fresh render session
    ///
    /// A backend that cannot even open a session yields an empty report with
    /// the error signal; the remaining sections still run.
    async fn crawl_one_section(
        &self,
        base_url: &Url,
        section: &str,
        options: &SectionCrawlOptions,
    ) -> SectionReport {
        let mut page = match self.backend.open_page().await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    "Render backend could not start for section {}: {}",
                    section,
                    e
                );
                return SectionReport {
                    pages: BTreeMap::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let report = SectionCrawler::new(&mut page, base_url, section, options)
            .run()
            .await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close render session for {}: {}", section, e);
        }

        report
    }
}
