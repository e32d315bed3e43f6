use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use email_harvester::config::load_config;
///
/// let config = load_config(Path::new("harvester.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Values given on the command line; each one set wins over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub max_pages: Option<usize>,
    pub concurrency: Option<usize>,
    /// Seconds
    pub timeout: Option<u64>,
    pub report_path: Option<PathBuf>,
}

/// Applies command line overrides on top of a (possibly default) file config
pub fn apply_overrides(mut config: Config, overrides: &ConfigOverrides) -> Config {
    if let Some(base_url) = &overrides.base_url {
        config.crawler.base_url = Some(base_url.clone());
    }
    if let Some(max_pages) = overrides.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(concurrency) = overrides.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(timeout) = overrides.timeout {
        config.crawler.page_timeout = timeout.saturating_mul(1000);
    }
    if let Some(report_path) = &overrides.report_path {
        config.output.report_path = Some(report_path.to_string_lossy().into_owned());
    }
    config
}
