//! Email-Harvester: a same-domain contact email crawler
//!
//! This crate crawls a single website breadth-first, extracts email addresses
//! (including common obfuscated spellings) from every page it visits, filters
//! out look-alike false positives and writes the survivors to a flat report.

pub mod config;
pub mod crawler;
pub mod email;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Email-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunStatus,
        to: state::RunStatus,
    },

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("No base URL given (pass one on the command line or set crawler.base-url)")]
    MissingBaseUrl,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Failure of a single page fetch
///
/// Fetch failures never abort a crawl; the coordinator logs them and treats the
/// page as if it had no content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("{url} redirects off-site to {location}")]
    OffSiteRedirect { url: String, location: String },
}

/// Result type alias for Email-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use email::{extract_emails, is_valid_email};
pub use state::{CrawlState, RunStatus, StopHandle};
pub use url::{is_in_scope, normalize_link};
