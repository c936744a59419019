//! Catalog-Scout: a product-URL discovery crawler
//!
//! This crate crawls e-commerce domains breadth-first and collects the URLs
//! that look like product pages, under bounded concurrency, per-domain request
//! pacing, and retry with exponential backoff. Each invocation is one crawl
//! run producing a JSON report keyed by domain.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod orchestrator;
pub mod report;

use thiserror::Error;

/// Main error type for Catalog-Scout operations
///
/// Only the top-level configuration/IO path surfaces these; everything below
/// the per-domain boundary degrades into result fields instead of erroring.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid domain {domain}: {message}")]
    InvalidDomain { domain: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read domains file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Domains file is empty")]
    EmptyDomainList,
}

/// Result type alias for Catalog-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{extract_product_id, is_product_url};
pub use config::CrawlConfig;
pub use crawler::{crawl_domain, RateLimiter, RetryPolicy};
pub use orchestrator::{run_concurrent, run_parallel};
pub use report::{CrawlStats, DomainResult};
