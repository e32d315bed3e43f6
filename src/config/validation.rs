use crate::config::types::{Config, CrawlConfig, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::url::normalize_link;
use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Validates the entire configuration
///
/// A missing base URL is not an error here; it may still come from the
/// command line. [`resolve`] insists on it.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the configuration and turns it into the settings of one run
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Every value is usable
/// * `Err(ConfigError)` - The base URL is missing or invalid, or a limit is
///   out of range
pub fn resolve(config: &Config) -> ConfigResult<CrawlConfig> {
    validate(config)?;

    let base_url = config
        .crawler
        .base_url
        .as_deref()
        .ok_or(ConfigError::MissingBaseUrl)?;

    CrawlConfig::new(base_url, config.crawler.max_pages, config.crawler.concurrency)?
        .with_page_timeout(Duration::from_millis(config.crawler.page_timeout))?
        .with_user_agent(&config.user_agent.user_agent)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if let Some(base_url) = &config.base_url {
        validate_base_url(base_url)?;
    }

    validate_crawl_limits(config.max_pages, config.concurrency)?;

    if config.page_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "page-timeout must be >= 1ms, got {}ms",
            config.page_timeout
        )));
    }

    Ok(())
}

/// Validates a base URL: absolute, http or https, with a host
pub(crate) fn validate_base_url(base_url: &str) -> ConfigResult<()> {
    normalize_link(base_url)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))
}

/// Both limits must be positive
pub(crate) fn validate_crawl_limits(max_pages: usize, concurrency: usize) -> ConfigResult<()> {
    if max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            max_pages
        )));
    }

    if concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be >= 1, got {}",
            concurrency
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    validate_user_agent(&config.user_agent)
}

/// A user agent must be a non-empty, single-line header value
pub(crate) fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent must not contain control characters, got {:?}",
            user_agent
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if let Some(path) = &config.report_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
