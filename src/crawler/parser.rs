//! HTML link extraction
//!
//! Given a fetched page body and its URL, produce the set of absolute
//! http/https URLs that stay on the crawled site. Relative hrefs are resolved
//! against the page URL; fragments are dropped so `/page` and `/page#reviews`
//! dedupe to one frontier entry.

use crate::crawler::CrawlScope;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts same-site links from an HTML document
pub fn extract_links(html: &str, base_url: &Url, scope: &CrawlScope) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_link(href, base_url) {
                    if scope.contains(&url) {
                        links.insert(url.to_string());
                    }
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute http/https URL
///
/// Returns None for empty hrefs, fragment-only anchors, and non-web schemes
/// (`javascript:`, `mailto:`, `tel:`, `data:`).
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut url = base_url.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}
