use url::Url;

/// Extracts the network location (`host[:port]`) from a URL
///
/// The host is lowercased by URL parsing and default ports are elided, so
/// `https://EXAMPLE.com:443/` and `https://example.com/` share a location.
/// Returns None if the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use email_harvester::url::network_location;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
