//! URL handling module for Email-Harvester
//!
//! This module provides link normalization, network location extraction and the
//! in-scope classification that keeps a crawl on its starting site.

mod domain;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::network_location;
pub use normalize::normalize_link;

/// Returns true if `candidate` belongs to the same site as `base`
///
/// A candidate is in scope when its network location (`host[:port]`) equals the
/// base URL's and its scheme is `http` or `https`. Unparsable input on either
/// side is out of scope; this function never fails.
///
/// # Examples
///
/// ```
/// use email_harvester::url::is_in_scope;
///
/// assert!(is_in_scope("https://example.com/contact", "https://example.com/"));
/// assert!(is_in_scope("http://example.com/about", "https://example.com/"));
/// assert!(!is_in_scope("https://blog.example.com/", "https://example.com/"));
/// assert!(!is_in_scope("ftp://example.com/file", "https://example.com/"));
/// assert!(!is_in_scope("not a url", "https://example.com/"));
/// ```
pub fn is_in_scope(candidate: &str, base: &str) -> bool {
    match (Url::parse(candidate), Url::parse(base)) {
        (Ok(candidate), Ok(base)) => is_url_in_scope(&candidate, &base),
        _ => false,
    }
}

/// Typed variant of [`is_in_scope`] for already parsed URLs
pub fn is_url_in_scope(candidate: &Url, base: &Url) -> bool {
    if !matches!(candidate.scheme(), "http" | "https") {
        return false;
    }

    match (network_location(candidate), network_location(base)) {
        (Some(candidate_loc), Some(base_loc)) => candidate_loc == base_loc,
        _ => false,
    }
}
