//! Page fetcher implementation
//!
//! This module handles retrieving page content for the crawler, including:
//! - The `Fetcher` trait the coordinator dispatches to
//! - Building HTTP clients with the configured user agent
//! - A reqwest based `HttpFetcher`
//! - Following redirects only while they stay on the same site
//! - Error classification into `FetchError`
//!
//! Fetches are single-attempt. A failed page stays visited and is not retried
//! within the same run.

use crate::url::is_url_in_scope;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed for a single page
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the content was served from, after any same-site redirects
    pub final_url: Url,

    /// Page content
    pub body: String,
}

impl FetchedPage {
    pub fn new(final_url: Url, body: impl Into<String>) -> Self {
        Self {
            final_url,
            body: body.into(),
        }
    }
}

/// Turns a URL into page content
///
/// Implementations must return within `timeout` and must not retry on their
/// own. Any failure is reported as a [`FetchError`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use email_harvester::crawler::build_http_client;
///
/// let client = build_http_client("Mozilla/5.0 (compatible; EmailHarvester/1.0)").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(Duration::from_secs(10))
        .redirect(same_site_redirects())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Follows up to [`MAX_REDIRECTS`] redirects, stopping at the first one that
/// leaves the requested site
fn same_site_redirects() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }

        let on_site = attempt
            .previous()
            .first()
            .map_or(true, |origin| is_url_in_scope(attempt.url(), origin));
        if on_site {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

/// Fetches pages over plain HTTP(S)
///
/// The body is returned as served; no JavaScript is executed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<FetchedPage, FetchError> {
        fetch_url(&self.client, url, timeout).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML (or no) Content-Type | `Ok(FetchedPage)` |
/// | 2xx with another Content-Type | `ContentMismatch` |
/// | Redirect to another site | `OffSiteRedirect` |
/// | Other non-2xx status | `Status` |
/// | Timeout | `Timeout` |
/// | Connection, DNS, TLS, redirect or body error | `Network` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `timeout` - Upper bound for the whole request, body included
pub async fn fetch_url(
    client: &Client,
    url: &Url,
    timeout: Duration,
) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();

    // The redirect policy only hands back a redirect it refused to follow
    if status.is_redirection() {
        if let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
        {
            return Err(FetchError::OffSiteRedirect {
                url: url.to_string(),
                location: location.to_string(),
            });
        }
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: url.to_string(),
            content_type,
        });
    }

    let mut final_url = response.url().clone();
    final_url.set_fragment(None);

    let body = response.text().await.map_err(|e| classify_error(url, e))?;
    Ok(FetchedPage::new(final_url, body))
}

/// Returns true for HTML-ish content types; a missing header counts as HTML
fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    lower.is_empty() || lower.contains("text/html") || lower.contains("application/xhtml")
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
