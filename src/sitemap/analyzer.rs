//! Sitemap fetching and classification

use crate::sitemap::{SitemapAnalysis, SAMPLE_URL_LIMIT};
use flate2::read::GzDecoder;
use reqwest::Client;
use serde::Deserialize;
use std::io::Read;

/// A `<sitemap>` or `<url>` entry; only the `<loc>` child matters here
#[derive(Debug, Deserialize)]
struct LocEntry {
    loc: String,
}

/// Sitemap document shape covering both roots
///
/// A `<sitemapindex>` root carries `<sitemap>` children, a `<urlset>` root
/// carries `<url>` children; quick-xml fills whichever list the document has.
#[derive(Debug, Deserialize)]
struct SitemapDocument {
    #[serde(rename = "sitemap", default)]
    child_sitemaps: Vec<LocEntry>,

    #[serde(rename = "url", default)]
    page_urls: Vec<LocEntry>,
}

/// Fetches and analyzes one sitemap URL
///
/// Fetch and parse failures are captured in the returned analysis rather than
/// propagated, so one broken sitemap never aborts the analysis of its
/// siblings.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `sitemap_url` - The sitemap URL to analyze
pub async fn analyze_sitemap(client: &Client, sitemap_url: &str) -> SitemapAnalysis {
    let content = match fetch_sitemap_content(client, sitemap_url).await {
        Ok(content) => content,
        Err(error) => return SitemapAnalysis::Error { error },
    };

    classify_sitemap(&content)
}

/// Fetches sitemap bytes, gunzipping when the URL carries a gzip suffix
async fn fetch_sitemap_content(client: &Client, sitemap_url: &str) -> Result<String, String> {
    let response = client
        .get(sitemap_url)
        .send()
        .await
        .map_err(|e| format!("fetch failed: {}", e))?;

    let response = response
        .error_for_status()
        .map_err(|e| format!("fetch failed: {}", e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("body read failed: {}", e))?;

    if sitemap_url.ends_with(".gz") {
        let mut decoder = GzDecoder::new(&bytes[..]);
        let mut decompressed = String::new();
        decoder
            .read_to_string(&mut decompressed)
            .map_err(|e| format!("gzip decompression failed: {}", e))?;
        Ok(decompressed)
    } else {
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Classifies sitemap XML as an index or a leaf sitemap
///
/// A document with any `<sitemap>` entries is an index; its analysis carries
/// every child sitemap URL. Otherwise the `<url>` entries are counted and at
/// most the first five are kept as a sample. Unparseable XML yields the error
/// kind.
pub fn classify_sitemap(content: &str) -> SitemapAnalysis {
    let document: SitemapDocument = match quick_xml::de::from_str(content) {
        Ok(doc) => doc,
        Err(e) => {
            return SitemapAnalysis::Error {
                error: format!("XML parse failed: {}", e),
            }
        }
    };

    if !document.child_sitemaps.is_empty() {
        return SitemapAnalysis::SitemapIndex {
            count: document.child_sitemaps.len(),
            sitemaps: document
                .child_sitemaps
                .into_iter()
                .map(|entry| entry.loc)
                .collect(),
        };
    }

    SitemapAnalysis::Sitemap {
        count: document.page_urls.len(),
        sample_urls: document
            .page_urls
            .into_iter()
            .take(SAMPLE_URL_LIMIT)
            .map(|entry| entry.loc)
            .collect(),
    }
}
