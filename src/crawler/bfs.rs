//! Breadth-first traversal of one domain's link graph
//!
//! The scheduler advances one wavefront per depth level. Within a wavefront,
//! URLs are fetched in batches of at most `max_concurrent_requests`; each
//! batch is awaited in full before the next starts, so in-flight fetches
//! never exceed the bound and batches at one depth execute in arrival order.

use crate::classify::is_product_url;
use crate::config::CrawlConfig;
use crate::crawler::{CrawlScope, Fetcher, RateLimiter};
use futures::future::join_all;
use std::collections::{BTreeSet, HashSet};

/// What one BFS run produced
#[derive(Debug)]
pub struct BfsOutcome {
    /// URLs classified as product pages, ordered for deterministic reports
    pub product_urls: BTreeSet<String>,

    /// Count of URLs dispatched for fetch
    pub urls_visited: usize,

    /// Deepest wavefront index actually executed
    pub depth_reached: u32,
}

/// Drives the depth-bounded crawl of one domain
pub struct BfsScheduler<'a> {
    config: &'a CrawlConfig,
    fetcher: &'a Fetcher,
}

impl<'a> BfsScheduler<'a> {
    pub fn new(config: &'a CrawlConfig, fetcher: &'a Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// Runs the traversal from the scope's seed URL
    ///
    /// Terminates after at most `max_depth + 1` wavefronts, or sooner when a
    /// wavefront discovers nothing new. A failing seed still terminates
    /// normally with an empty product set.
    pub async fn run(&self, scope: &CrawlScope, limiter: &RateLimiter) -> BfsOutcome {
        let mut visited: HashSet<String> = HashSet::new();
        let mut products: BTreeSet<String> = BTreeSet::new();
        let mut frontier: HashSet<String> = HashSet::new();
        frontier.insert(scope.seed().to_string());

        let mut depth: u32 = 0;

        while !frontier.is_empty() && depth <= self.config.max_depth {
            // Visited-set insertion doubles as the dedup filter: a URL enters
            // a wavefront at most once per crawl
            let wavefront: Vec<String> = frontier
                .into_iter()
                .filter(|url| visited.insert(url.clone()))
                .collect();

            tracing::debug!(
                "Depth {}: fetching {} URLs ({} visited so far)",
                depth,
                wavefront.len(),
                visited.len()
            );

            let mut discovered: HashSet<String> = HashSet::new();
            for batch in wavefront.chunks(self.config.max_concurrent_requests) {
                let fetches = batch
                    .iter()
                    .map(|url| self.fetcher.fetch_links(url, scope, limiter));

                for links in join_all(fetches).await {
                    discovered.extend(links);
                }
            }

            for url in &discovered {
                if is_product_url(url) {
                    products.insert(url.clone());
                }
            }

            // Product pages stay eligible for the next frontier; only
            // already-visited URLs are dropped
            frontier = discovered
                .into_iter()
                .filter(|url| !visited.contains(url))
                .collect();
            depth += 1;
        }

        BfsOutcome {
            product_urls: products,
            urls_visited: visited.len(),
            depth_reached: depth.saturating_sub(1),
        }
    }
}
