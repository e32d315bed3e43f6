//! HTML parsing and link extraction
//!
//! This module turns a fetched page into the in-scope links worth following:
//! - Collecting raw `<a href>` targets from the document
//! - Resolving them against the page URL
//! - Keeping only links on the crawl's own site
//! - Splitting contact-like links into a priority list

use crate::state::DiscoveredLinks;
use crate::url::{is_url_in_scope, normalize_link};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::{Position, Url};

/// Path tokens that mark a page as likely to list contact addresses
const PRIORITY_TOKENS: &[&str] = &["contact", "about", "team", "staff"];

/// Returns the raw `href` of every followable anchor in the document
///
/// Anchors carrying a `download` attribute are skipped. Targets are returned
/// verbatim; resolving them is the caller's job.
///
/// # Example
///
/// ```
/// use email_harvester::crawler::extract_anchor_hrefs;
///
/// let html = r#"<a href="/contact">Contact</a><a href="/cv.pdf" download>CV</a>"#;
/// assert_eq!(extract_anchor_hrefs(html), vec!["/contact".to_string()]);
/// ```
pub fn extract_anchor_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Extracts the in-scope links of a page
///
/// Each anchor is resolved against `page_url`, normalized, and kept only if it
/// is in scope for `base_url`. Links are de-duplicated in document order and
/// split into priority and ordinary lists.
///
/// # Arguments
///
/// * `html` - The page content
/// * `page_url` - The URL the page was fetched from
/// * `base_url` - The crawl's starting URL, which defines the scope
pub fn extract_links(html: &str, page_url: &Url, base_url: &Url) -> DiscoveredLinks {
    let mut seen = HashSet::new();
    let mut links = DiscoveredLinks::default();

    for href in extract_anchor_hrefs(html) {
        let Some(url) = resolve_link(&href, page_url) else {
            continue;
        };

        if !is_url_in_scope(&url, base_url) || !seen.insert(url.as_str().to_string()) {
            continue;
        }

        if is_priority_url(&url) {
            links.priority.push(url);
        } else {
            links.ordinary.push(url);
        }
    }

    links
}

/// Returns true if the URL looks like a contact, about, team or staff page
///
/// Only the path and query are inspected; a host such as `teamwork.com` must
/// not turn every page of the site into a priority page.
pub fn is_priority_url(url: &Url) -> bool {
    let lower = url[Position::BeforePath..].to_lowercase();
    PRIORITY_TOKENS.iter().any(|token| lower.contains(token))
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let absolute = page_url.join(href).ok()?;
    normalize_link(absolute.as_str()).ok()
}
