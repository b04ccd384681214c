//! URL handling helpers for Outline-Scout
//!
//! Small utilities for joining section paths onto a base URL and for checking
//! that discovered links stay on the crawled site.

use url::Url;

/// Joins a section path onto a base URL.
///
/// # Arguments
///
/// * `base` - The site base URL (e.g., `https://example.com`)
/// * `path` - An absolute section path (e.g., `/math`)
///
/// # Returns
///
/// * `Ok(Url)` - The joined URL
/// * `Err(url::ParseError)` - The path could not be joined
pub fn join_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    base.join(path)
}

/// Returns true if `candidate` parses as a URL with the same origin
/// (scheme, host, port) as `base`.
///
/// Links that fail to parse are treated as foreign and rejected.
pub fn same_origin(candidate: &str, base: &Url) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => parsed.origin() == base.origin(),
        Err(_) => false,
    }
}
