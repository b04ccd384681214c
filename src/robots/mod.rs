//! Robots.txt handling module
//!
//! This module provides functionality for fetching robots.txt and resolving it
//! into a crawl policy: path verdicts, the wildcard crawl delay, and the list
//! of advertised sitemaps.

mod parser;

pub use parser::CrawlPolicy;

use crate::ScoutError;
use reqwest::Client;
use url::Url;

/// Fetches the robots.txt text for a site
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `base_url` - The site base URL; `/robots.txt` is resolved against it
///
/// # Returns
///
/// * `Ok(String)` - The raw robots.txt body
/// * `Err(ScoutError)` - The file could not be fetched; callers degrade to a
///   permissive policy and record the failure
pub async fn fetch_robots(client: &Client, base_url: &Url) -> Result<String, ScoutError> {
    let robots_url = crate::url::join_url(base_url, "/robots.txt")?;

    let response = client
        .get(robots_url.clone())
        .send()
        .await
        .map_err(|source| ScoutError::Http {
            url: robots_url.to_string(),
            source,
        })?;

    let response = response
        .error_for_status()
        .map_err(|source| ScoutError::Http {
            url: robots_url.to_string(),
            source,
        })?;

    let body = response.text().await.map_err(|source| ScoutError::Http {
        url: robots_url.to_string(),
        source,
    })?;

    Ok(body)
}

/// Checks if a URL is allowed by the resolved policy
///
/// # Arguments
///
/// * `policy` - The resolved crawl policy
/// * `url` - The URL to check
/// * `user_agent` - The user agent string
pub fn is_allowed(policy: &CrawlPolicy, url: &str, user_agent: &str) -> bool {
    policy.is_allowed(url, user_agent)
}
