//! Bounded traversal of one site section
//!
//! A section (a top-level path like `/math`) is crawled as an independent
//! unit: its own visited set, its own page budget, its own results map. The
//! traversal is driven by an explicit FIFO work queue of (url, depth) pairs,
//! so the budget and visited checks happen at a single dequeue chokepoint and
//! the call stack stays flat regardless of link graph shape.

use crate::crawler::headings::{extract_headings, PageHeadings};
use crate::render::PageSession;
use crate::url::{join_url, same_origin};
use crate::RenderResult;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Limits and timings for one section crawl
#[derive(Debug, Clone)]
pub struct SectionCrawlOptions {
    /// Maximum traversal depth below the section root (0 = root only)
    pub max_depth: u32,

    /// Maximum pages to visit in this section
    pub max_pages: u32,

    /// Delay between consecutive page visits
    pub request_delay: Duration,

    /// Bound on the wait for the page body to appear
    pub wait_timeout: Duration,

    /// Fixed settle time after the body appears
    pub settle_delay: Duration,
}

/// Outcome of one section crawl
///
/// `pages` is complete for a clean run and partial when `error` is set (the
/// render backend failed mid-section).
#[derive(Debug)]
pub struct SectionReport {
    /// Headings per visited URL
    pub pages: BTreeMap<String, PageHeadings>,

    /// Error signal when the backend aborted the section
    pub error: Option<String>,
}

/// Mutable traversal state shared across the whole exploration of one section
///
/// A single instance serves every branch, so a URL reachable via two paths is
/// visited once and the page budget applies across branches.
struct SectionCrawlState {
    visited: HashSet<String>,
    pages_crawled: u32,
    results: BTreeMap<String, PageHeadings>,
}

/// Crawler for a single section
pub struct SectionCrawler<'a, P: PageSession> {
    page: &'a mut P,
    base_url: &'a Url,
    section_path: &'a str,
    options: &'a SectionCrawlOptions,
    state: SectionCrawlState,
}

impl<'a, P: PageSession> SectionCrawler<'a, P> {
    /// Creates a crawler for one section
    ///
    /// # Arguments
    ///
    /// * `page` - An open render session, used for every page of this section
    /// * `base_url` - The site base URL
    /// * `section_path` - The section path (e.g., `/math`)
    /// * `options` - Limits and timings
    pub fn new(
        page: &'a mut P,
        base_url: &'a Url,
        section_path: &'a str,
        options: &'a SectionCrawlOptions,
    ) -> Self {
        Self {
            page,
            base_url,
            section_path,
            options,
            state: SectionCrawlState {
                visited: HashSet::new(),
                pages_crawled: 0,
                results: BTreeMap::new(),
            },
        }
    }

    /// Runs the traversal and returns the section report
    ///
    /// Per-page render failures are contained: the page is recorded with
    /// empty headings and no links are discovered from it. Only a fatal
    /// backend failure aborts the section, and even then the partial results
    /// are returned together with the error signal.
    pub async fn run(mut self) -> SectionReport {
        let start_url = match join_url(self.base_url, self.section_path) {
            Ok(url) => url,
            Err(e) => {
                return SectionReport {
                    pages: self.state.results,
                    error: Some(format!(
                        "invalid section start URL for '{}': {}",
                        self.section_path, e
                    )),
                };
            }
        };

        let mut queue: VecDeque<(String, u32)> = VecDeque::new();
        queue.push_back((start_url.to_string(), 0));

        while let Some((url, depth)) = queue.pop_front() {
            if self.state.pages_crawled >= self.options.max_pages {
                break;
            }

            if !self.state.visited.insert(url.clone()) {
                continue;
            }

            // Politeness delay between consecutive page visits
            if self.state.pages_crawled > 0 && !self.options.request_delay.is_zero() {
                tokio::time::sleep(self.options.request_delay).await;
            }

            self.state.pages_crawled += 1;
            tracing::info!(
                "Crawling page {} (depth {}): {}",
                self.state.pages_crawled,
                depth,
                url
            );

            let headings = match self.visit_page(&url).await {
                Ok(headings) => headings,
                Err(e) if e.is_fatal() => {
                    tracing::error!(
                        "Render backend failed in section {}: {}",
                        self.section_path,
                        e
                    );
                    self.state.results.insert(url, PageHeadings::empty());
                    return SectionReport {
                        pages: self.state.results,
                        error: Some(e.to_string()),
                    };
                }
                Err(e) => {
                    // Recoverable per-page failure: record the page with no
                    // headings and move on without discovering links from it
                    tracing::warn!("Failed to render {}: {}", url, e);
                    self.state.results.insert(url, PageHeadings::empty());
                    continue;
                }
            };

            tracing::debug!("Extracted {} headings from {}", headings.total_records(), url);
            self.state.results.insert(url.clone(), headings);

            if depth < self.options.max_depth {
                match self.discover_links(&url).await {
                    Ok(links) => {
                        for link in links {
                            queue.push_back((link, depth + 1));
                        }
                    }
                    Err(e) if e.is_fatal() => {
                        tracing::error!(
                            "Render backend failed in section {}: {}",
                            self.section_path,
                            e
                        );
                        return SectionReport {
                            pages: self.state.results,
                            error: Some(e.to_string()),
                        };
                    }
                    Err(e) => {
                        tracing::warn!("Link discovery failed on {}: {}", url, e);
                    }
                }
            }
        }

        tracing::info!(
            "Section {} complete: {} pages crawled",
            self.section_path,
            self.state.pages_crawled
        );

        SectionReport {
            pages: self.state.results,
            error: None,
        }
    }

    /// Navigates to a page, waits for it to settle, and extracts headings
    async fn visit_page(&mut self, url: &str) -> RenderResult<PageHeadings> {
        self.page.navigate(url).await?;
        self.page
            .wait_for_element("body", self.options.wait_timeout)
            .await?;

        // Give asynchronous content time to populate
        if !self.options.settle_delay.is_zero() {
            tokio::time::sleep(self.options.settle_delay).await;
        }

        extract_headings(self.page).await
    }

    /// Enumerates same-section candidate links from the current page
    ///
    /// Candidates keep the order the backend returns (document order for the
    /// WebDriver backend); duplicates are weeded out later by the visited set.
    async fn discover_links(&mut self, url: &str) -> RenderResult<Vec<String>> {
        let hrefs = self.page.link_hrefs().await?;
        let total = hrefs.len();

        let candidates: Vec<String> = hrefs
            .into_iter()
            .filter(|href| self.is_section_candidate(href))
            .collect();

        tracing::debug!(
            "{}: {} of {} links stay in section {}",
            url,
            candidates.len(),
            total,
            self.section_path
        );

        Ok(candidates)
    }

    /// Same-origin check plus a substring match on the section path.
    /// The substring match is intentionally loose: '/math' also claims
    /// '/blog/math-jokes'.
    fn is_section_candidate(&self, href: &str) -> bool {
        same_origin(href, self.base_url) && href.contains(self.section_path)
    }
}
