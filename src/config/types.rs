use serde::Deserialize;

/// Main configuration structure for Outline-Scout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub render: RenderConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Base URL of the site to crawl
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum depth to crawl below each section root
    /// (0 = section root only)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages to visit per section
    #[serde(rename = "max-pages-per-section")]
    pub max_pages_per_section: u32,

    /// Default delay between page requests, in seconds. A wildcard
    /// Crawl-delay in robots.txt takes precedence over this value.
    #[serde(rename = "crawl-delay")]
    pub crawl_delay: f64,

    /// Candidate section paths to test against robots.txt and crawl
    /// when allowed
    pub sections: Vec<String>,
}

/// Render backend configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// WebDriver endpoint of a running chromedriver
    #[serde(rename = "webdriver-url")]
    pub webdriver_url: String,

    /// Bound on the wait for the page body to appear (milliseconds)
    #[serde(rename = "wait-timeout-ms")]
    pub wait_timeout_ms: u64,

    /// Fixed settle time after the body appears, for late async content
    /// (milliseconds)
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON summary document
    #[serde(rename = "results-path")]
    pub results_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            render: RenderConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.khanacademy.org".to_string(),
            max_depth: 2,
            max_pages_per_section: 1,
            crawl_delay: 2.0,
            sections: vec![
                "/math".to_string(),
                "/science".to_string(),
                "/computing".to_string(),
                "/humanities".to_string(),
            ],
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            wait_timeout_ms: 10_000,
            settle_delay_ms: 2_000,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "OutlineScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/outline-scout".to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: "crawl_results.json".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the full user agent string sent with every request
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn full_user_agent(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}
