use crate::config::validation::{validate_crawl_limits, validate_user_agent};
use crate::url::normalize_link;
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Default page budget
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Default number of pages fetched per batch
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default per-page fetch timeout (milliseconds)
pub const DEFAULT_PAGE_TIMEOUT_MS: u64 = 30_000;

/// Browser-like user agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration file structure for Email-Harvester
///
/// Every section is optional; missing keys fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Site to crawl; may also be given on the command line
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,

    /// Maximum number of pages dispatched in one run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of pages fetched concurrently per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-page fetch timeout (milliseconds)
    #[serde(rename = "page-timeout", default = "default_page_timeout")]
    pub page_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            max_pages: DEFAULT_MAX_PAGES,
            concurrency: DEFAULT_CONCURRENCY,
            page_timeout: DEFAULT_PAGE_TIMEOUT_MS,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the plain text report; a timestamped name is used when unset
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_page_timeout() -> u64 {
    DEFAULT_PAGE_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Validated, immutable settings for one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Normalized base URL; also the seed of the frontier
    pub base_url: Url,

    /// Upper bound on dispatched pages
    pub max_pages: usize,

    /// Upper bound on pages per batch
    pub concurrency: usize,

    /// Upper bound on a single fetch
    pub page_timeout: Duration,

    /// User-Agent header for every request
    pub user_agent: String,
}

impl CrawlConfig {
    /// Creates a crawl configuration with the default timeout and user agent
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlConfig)` - The base URL is an absolute http(s) URL and both
    ///   limits are positive
    /// * `Err(ConfigError)` - Otherwise
    pub fn new(base_url: &str, max_pages: usize, concurrency: usize) -> ConfigResult<Self> {
        let base_url = normalize_link(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        validate_crawl_limits(max_pages, concurrency)?;

        Ok(Self {
            base_url,
            max_pages,
            concurrency,
            page_timeout: Duration::from_millis(DEFAULT_PAGE_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Replaces the per-page timeout
    pub fn with_page_timeout(mut self, page_timeout: Duration) -> ConfigResult<Self> {
        if page_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "page timeout must be greater than zero".to_string(),
            ));
        }
        self.page_timeout = page_timeout;
        Ok(self)
    }

    /// Replaces the user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> ConfigResult<Self> {
        validate_user_agent(user_agent)?;
        self.user_agent = user_agent.to_string();
        Ok(self)
    }
}
