//! Robots.txt policy parsing
//!
//! This module turns raw robots.txt text into a [`CrawlPolicy`]: Allow/Disallow
//! verdicts are delegated to the robotstxt crate's matcher, while the wildcard
//! Crawl-delay and the Sitemap directives are parsed manually from the text.

use robotstxt::DefaultMatcher;

/// Resolved crawl policy for one run
///
/// Wraps the raw robots.txt content (rule precedence is evaluated on demand by
/// the matcher) together with the manually parsed wildcard crawl delay and the
/// list of advertised sitemaps. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct CrawlPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = evaluate content)
    permissive: bool,
    /// Crawl-delay parsed from the wildcard agent block, if any
    crawl_delay_secs: Option<f64>,
    /// Sitemap URLs advertised anywhere in the file, in order of appearance
    sitemap_urls: Vec<String>,
}

impl CrawlPolicy {
    /// Creates a new CrawlPolicy from raw robots.txt content
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    ///
    /// # Returns
    ///
    /// A CrawlPolicy that can answer path verdicts and expose the crawl delay
    /// and sitemap list
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            permissive: false,
            crawl_delay_secs: parse_wildcard_crawl_delay(content),
            sitemap_urls: parse_sitemap_urls(content),
        }
    }

    /// Creates a permissive CrawlPolicy that allows everything
    ///
    /// This is the fallback when robots.txt cannot be fetched: crawling must
    /// remain possible even without policy data.
    pub fn permissive() -> Self {
        Self {
            content: String::new(),
            permissive: true,
            crawl_delay_secs: None,
            sitemap_urls: Vec::new(),
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// Verdicts use standard longest-matching-prefix precedence among the
    /// Allow/Disallow rules of the applicable agent group; a URL matched by no
    /// rule is allowed.
    ///
    /// # Arguments
    ///
    /// * `url` - The full URL or path to check
    /// * `user_agent` - The user agent string
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.permissive || self.content.is_empty() {
            return true;
        }

        // Parse and check on-demand
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// The Crawl-delay of the wildcard agent block, if one was specified
    ///
    /// The manually parsed wildcard value takes precedence over any
    /// library-computed delay; the matcher library (a port of Google's
    /// parser) computes none, so this is the only non-default source.
    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay_secs
    }

    /// Sitemap URLs advertised in the file, in order of appearance
    pub fn sitemap_urls(&self) -> &[String] {
        &self.sitemap_urls
    }
}

/// Parses the Crawl-delay directive of the wildcard agent block
///
/// Tracks the currently active user-agent group line by line; only a
/// Crawl-delay inside a `User-agent: *` group counts. The first such value
/// wins.
fn parse_wildcard_crawl_delay(content: &str) -> Option<f64> {
    let mut in_wildcard_group = false;

    for line in content.lines() {
        let trimmed = line.trim();

        // Skip comments and empty lines
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = trimmed.split_once(':') {
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    in_wildcard_group = value == "*";
                }
                "crawl-delay" if in_wildcard_group => {
                    if let Ok(delay) = value.parse::<f64>() {
                        if delay.is_finite() && delay >= 0.0 {
                            return Some(delay);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    None
}

/// Collects every Sitemap directive, regardless of agent block
fn parse_sitemap_urls(content: &str) -> Vec<String> {
    let mut urls = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some((key, value)) = trimmed.split_once(':') {
            if key.trim().eq_ignore_ascii_case("sitemap") {
                let value = value.trim();
                if !value.is_empty() {
                    urls.push(value.to_string());
                }
            }
        }
    }

    urls
}
