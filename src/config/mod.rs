//! Configuration module for Email-Harvester
//!
//! This module handles loading TOML configuration files, applying command line
//! overrides, and validating the result into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use email_harvester::config::{apply_overrides, load_config, resolve, ConfigOverrides};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! let overrides = ConfigOverrides {
//!     max_pages: Some(10),
//!     ..Default::default()
//! };
//! let crawl = resolve(&apply_overrides(config, &overrides)).unwrap();
//! println!("Crawling {} ({} pages max)", crawl.base_url, crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_CONCURRENCY,
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_TIMEOUT_MS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, ConfigOverrides};
pub use validation::{resolve, validate};
