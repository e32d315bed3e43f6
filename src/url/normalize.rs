use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a link so that each page has exactly one frontier key
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not `http` or `https`
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
///
/// Host lowercasing, default-port elision and dot-segment removal are done by
/// URL parsing itself. Unlike a general-purpose canonicalizer this keeps the
/// scheme, `www.` prefix, trailing slash and query untouched: they can change
/// which page a server returns.
///
/// # Examples
///
/// ```
/// use email_harvester::url::normalize_link;
///
/// let url = normalize_link("https://Example.com/a/../contact#form").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/contact");
/// ```
pub fn normalize_link(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
