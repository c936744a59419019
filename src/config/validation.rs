use crate::config::CrawlConfig;
use crate::ConfigError;

/// Validates a crawl configuration
///
/// Rejects values that would make a crawl meaningless (zero concurrency, zero
/// timeout) or hostile (negative delays).
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be >= 1, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.crawl_delay < 0.0 || !config.crawl_delay.is_finite() {
        return Err(ConfigError::Validation(format!(
            "crawl_delay must be a non-negative number of seconds, got {}",
            config.crawl_delay
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1 second, got {}",
            config.timeout
        )));
    }

    if config.retry_delay < 0.0 || !config.retry_delay.is_finite() {
        return Err(ConfigError::Validation(format!(
            "retry_delay must be a non-negative number of seconds, got {}",
            config.retry_delay
        )));
    }

    Ok(())
}
