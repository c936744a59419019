//! Crawl results and report persistence
//!
//! One [`DomainResult`] per crawled domain, aggregated into a map keyed by
//! the caller's original domain string and written as indented JSON to a
//! timestamped file under the configured output directory.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Wall-clock envelope of one domain crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlTime {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_seconds: f64,
}

impl CrawlTime {
    /// Builds the envelope from start/end instants
    pub fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let duration_seconds = (end - start).num_milliseconds() as f64 / 1000.0;
        Self {
            start,
            end,
            duration_seconds,
        }
    }

    /// Degenerate envelope for a crawl that failed before producing timing
    pub fn instant(at: DateTime<Utc>) -> Self {
        Self::span(at, at)
    }
}

/// Statistics for one domain crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub total_urls_found: usize,
    pub total_urls_visited: usize,
    pub depth_reached: u32,
    pub crawl_time: CrawlTime,

    /// Only present on failed crawls, always "failed"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The result of crawling one domain
///
/// Immutable once produced. A failed crawl still yields a result: empty
/// product list, `error` set, stats marked failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainResult {
    pub product_urls: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub stats: CrawlStats,
}

impl DomainResult {
    /// Builds the failed-crawl result contract for a domain
    pub fn failed(message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            product_urls: Vec::new(),
            error: Some(message.into()),
            stats: CrawlStats {
                total_urls_found: 0,
                total_urls_visited: 0,
                depth_reached: 0,
                crawl_time: CrawlTime::instant(now),
                status: Some("failed".to_string()),
            },
        }
    }
}

/// Aggregated results of one crawl run, keyed by domain
pub type CrawlReport = BTreeMap<String, DomainResult>;

/// Writes the aggregated report as indented JSON
///
/// The file name carries a local timestamp and a mode-specific prefix
/// (`crawl_results_*` single-process, `parallel_crawl_results_*` parallel).
/// The output directory is created if absent. Returns the written path.
pub fn save_report(
    results: &CrawlReport,
    output_dir: &Path,
    parallel: bool,
) -> crate::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let prefix = if parallel {
        "parallel_crawl_results"
    } else {
        "crawl_results"
    };
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = output_dir.join(format!("{}_{}.json", prefix, stamp));

    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)?;

    tracing::info!("Results saved to {}", path.display());
    Ok(path)
}

/// Logs a per-domain summary of the run
pub fn log_summary(results: &CrawlReport) {
    let total_products: usize = results
        .values()
        .map(|result| result.product_urls.len())
        .sum();

    tracing::info!("Crawling completed. Summary:");
    tracing::info!("Total product URLs found: {}", total_products);

    for (domain, result) in results {
        tracing::info!(
            "Domain {}: {} product URLs, {} URLs visited, depth {}, {:.2}s",
            domain,
            result.product_urls.len(),
            result.stats.total_urls_visited,
            result.stats.depth_reached,
            result.stats.crawl_time.duration_seconds
        );
        if let Some(error) = &result.error {
            tracing::warn!("Domain {} encountered error: {}", domain, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_result() -> DomainResult {
        let start = Utc::now();
        DomainResult {
            product_urls: vec!["https://example.com/products/shoe-1".to_string()],
            error: None,
            stats: CrawlStats {
                total_urls_found: 1,
                total_urls_visited: 3,
                depth_reached: 1,
                crawl_time: CrawlTime::span(start, start + chrono::Duration::seconds(2)),
                status: None,
            },
        }
    }

    #[test]
    fn test_successful_result_omits_error_and_status() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert!(json.get("error").is_none());
        assert!(json["stats"].get("status").is_none());
        assert_eq!(json["stats"]["total_urls_visited"], 3);
    }

    #[test]
    fn test_failed_result_contract() {
        let result = DomainResult::failed("connection refused");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["product_urls"].as_array().unwrap().len(), 0);
        assert_eq!(json["error"], "connection refused");
        assert_eq!(json["stats"]["status"], "failed");
    }

    #[test]
    fn test_crawl_time_duration() {
        let start = Utc::now();
        let time = CrawlTime::span(start, start + chrono::Duration::milliseconds(2500));
        assert!((time.duration_seconds - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_save_report_single_mode_filename() {
        let dir = TempDir::new().unwrap();
        let mut results = CrawlReport::new();
        results.insert("example.com".to_string(), sample_result());

        let path = save_report(&results, dir.path(), false).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("crawl_results_"));
        assert!(name.ends_with(".json"));

        let written: CrawlReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            written["example.com"].product_urls,
            vec!["https://example.com/products/shoe-1"]
        );
    }

    #[test]
    fn test_save_report_parallel_mode_filename() {
        let dir = TempDir::new().unwrap();
        let results = CrawlReport::new();

        let path = save_report(&results, dir.path(), true).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("parallel_crawl_results_"));
    }

    #[test]
    fn test_save_report_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("output");
        let results = CrawlReport::new();

        let path = save_report(&results, &nested, false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_result_round_trip() {
        let result = DomainResult::failed("boom");
        let json = serde_json::to_string(&result).unwrap();
        let back: DomainResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.error.as_deref(), Some("boom"));
        assert_eq!(back.stats.status.as_deref(), Some("failed"));
    }
}
