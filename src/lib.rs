//! Outline-Scout: a polite website outline mapper
//!
//! This crate implements a bounded web crawler that checks a site's robots.txt
//! policy, analyzes its sitemaps, and walks a fixed set of site sections with a
//! headless render backend, extracting the heading hierarchy of every visited
//! page into a single JSON summary document.

pub mod config;
pub mod crawler;
pub mod output;
pub mod render;
pub mod robots;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Outline-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Render backend error: {0}")]
    Render(#[from] RenderError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by the render backend.
///
/// Session-level failures are fatal for the section being crawled; everything
/// else is contained per page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start render session at {endpoint}: {message}")]
    SessionSetup { endpoint: String, message: String },

    #[error("render session lost: {0}")]
    SessionLost(String),

    #[error("navigation failed for {url}: {message}")]
    Navigate { url: String, message: String },

    #[error("timed out after {timeout_ms}ms waiting for '{selector}'")]
    WaitTimeout { selector: String, timeout_ms: u64 },

    #[error("script execution failed: {0}")]
    Script(String),
}

impl RenderError {
    /// Returns true if the backend itself is unusable and the current section
    /// crawl must be aborted, as opposed to a recoverable per-page failure.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::SessionSetup { .. } | RenderError::SessionLost(_)
        )
    }
}

/// Result type alias for Outline-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for render backend operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{HeadingRecord, PageHeadings};
pub use output::CrawlSummary;
pub use robots::CrawlPolicy;
pub use sitemap::SitemapAnalysis;
