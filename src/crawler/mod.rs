//! Crawl engine
//!
//! This module contains the core crawling logic:
//! - Per-domain request pacing ([`RateLimiter`])
//! - Fetch outcome classification and retry decisions ([`RetryPolicy`])
//! - HTTP fetching with an internal retry loop ([`Fetcher`])
//! - HTML link extraction scoped to the crawled site
//! - Breadth-first traversal with bounded batch concurrency ([`BfsScheduler`])
//! - Per-domain orchestration producing a [`crate::DomainResult`]

mod bfs;
mod domain;
mod fetcher;
mod limiter;
mod parser;
mod retry;

pub use bfs::{BfsOutcome, BfsScheduler};
pub use domain::{crawl_domain, CrawlScope, DomainCrawler};
pub use fetcher::{build_http_client, Fetcher};
pub use limiter::RateLimiter;
pub use parser::extract_links;
pub use retry::{FetchOutcome, RetryDecision, RetryPolicy};
