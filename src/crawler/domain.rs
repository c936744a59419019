//! Per-domain crawl orchestration
//!
//! One [`DomainCrawler`] run owns one [`RateLimiter`] and one BFS traversal,
//! brackets them with wall-clock timestamps, and converts any failure into a
//! [`DomainResult`] carrying an error message. A domain's failure never
//! escapes this module; sibling domains in a batch are unaffected.

use crate::config::CrawlConfig;
use crate::crawler::{BfsOutcome, BfsScheduler, Fetcher, RateLimiter, RetryPolicy};
use crate::report::{CrawlStats, CrawlTime, DomainResult};
use crate::ScoutError;
use chrono::Utc;
use reqwest::Client;
use url::Url;

/// The site boundary of one domain crawl
///
/// Built from the caller's domain string: a bare hostname seeds
/// `https://<host>`, while an explicit `http://` or `https://` prefix is
/// honored as-is (useful for storefronts that never upgraded, and for tests
/// against plain-HTTP servers). A URL is in scope when its scheme is http(s)
/// and its host and port match the seed.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    seed: Url,
}

impl CrawlScope {
    pub fn for_domain(domain: &str) -> crate::Result<Self> {
        let raw = if domain.contains("://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };

        let seed = Url::parse(&raw).map_err(|e| ScoutError::InvalidDomain {
            domain: domain.to_string(),
            message: e.to_string(),
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ScoutError::InvalidDomain {
                domain: domain.to_string(),
                message: format!("unsupported scheme {}", seed.scheme()),
            });
        }

        if seed.host_str().is_none() {
            return Err(ScoutError::InvalidDomain {
                domain: domain.to_string(),
                message: "no host".to_string(),
            });
        }

        Ok(Self { seed })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Whether a URL belongs to the crawled site
    pub fn contains(&self, url: &Url) -> bool {
        (url.scheme() == "http" || url.scheme() == "https")
            && url.host_str() == self.seed.host_str()
            && url.port_or_known_default() == self.seed.port_or_known_default()
    }
}

/// Runs complete single-domain crawls against a shared HTTP client
pub struct DomainCrawler<'a> {
    config: &'a CrawlConfig,
    client: &'a Client,
}

impl<'a> DomainCrawler<'a> {
    pub fn new(config: &'a CrawlConfig, client: &'a Client) -> Self {
        Self { config, client }
    }

    /// Crawls one domain to completion
    ///
    /// Always returns a result: failures (unparseable domain, internal
    /// errors) are captured in the `error` field rather than propagated.
    pub async fn run(&self, domain: &str) -> DomainResult {
        let start = Utc::now();
        tracing::info!("Starting crawl of {}", domain);

        match self.traverse(domain).await {
            Ok(outcome) => {
                let end = Utc::now();
                let product_count = outcome.product_urls.len();
                tracing::info!(
                    "Finished {}: {} product URLs, {} visited, depth {}",
                    domain,
                    product_count,
                    outcome.urls_visited,
                    outcome.depth_reached
                );

                DomainResult {
                    product_urls: outcome.product_urls.into_iter().collect(),
                    error: None,
                    stats: CrawlStats {
                        total_urls_found: product_count,
                        total_urls_visited: outcome.urls_visited,
                        depth_reached: outcome.depth_reached,
                        crawl_time: CrawlTime::span(start, end),
                        status: None,
                    },
                }
            }

            Err(e) => {
                tracing::error!("Error crawling {}: {}", domain, e);
                DomainResult::failed(e.to_string())
            }
        }
    }

    async fn traverse(&self, domain: &str) -> crate::Result<BfsOutcome> {
        let scope = CrawlScope::for_domain(domain)?;
        let limiter = RateLimiter::new(self.config.delay());
        let fetcher = Fetcher::new(self.client.clone(), RetryPolicy::from_config(self.config));
        let scheduler = BfsScheduler::new(self.config, &fetcher);

        Ok(scheduler.run(&scope, &limiter).await)
    }
}

/// Crawls one domain with a fresh crawler instance
pub async fn crawl_domain(domain: &str, config: &CrawlConfig, client: &Client) -> DomainResult {
    DomainCrawler::new(config, client).run(domain).await
}
