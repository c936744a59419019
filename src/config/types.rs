use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Immutable configuration for one crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of concurrent fetches within one domain crawl
    pub max_concurrent_requests: usize,

    /// Minimum time between fetch starts against the same domain (seconds)
    pub crawl_delay: f64,

    /// Maximum link-graph depth to traverse from the seed URL
    pub max_depth: u32,

    /// Per-request timeout (seconds)
    pub timeout: u64,

    /// Maximum number of retries for a failed fetch
    pub max_retries: u32,

    /// Initial delay between retries, doubled on each attempt (seconds)
    pub retry_delay: f64,

    /// Directory where result files are written
    pub output_dir: PathBuf,
}

impl CrawlConfig {
    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Minimum inter-request spacing as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.crawl_delay)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 10,
            crawl_delay: 1.0,
            max_depth: 3,
            timeout: 30,
            max_retries: 3,
            retry_delay: 2.0,
            output_dir: PathBuf::from("output"),
        }
    }
}
