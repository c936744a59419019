//! HTTP fetching
//!
//! Builds the shared HTTP client and performs single-URL fetches with the
//! retry loop. A fetch never fails past this module: every terminal state
//! resolves to a (possibly empty) set of discovered links plus a tracing
//! event.

use crate::crawler::parser::extract_links;
use crate::crawler::{CrawlScope, FetchOutcome, RateLimiter, RetryDecision, RetryPolicy};
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use reqwest::{redirect::Policy, Client};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Browser User-Agent strings rotated per request
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
];

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Builds the HTTP client shared by one crawl run
///
/// Redirects are followed (up to 10 hops) and TLS certificate verification is
/// disabled: target storefronts frequently serve mismatched or expired
/// certificates, and skipping verification is the documented insecure default
/// here. Do not reuse this client for anything security-sensitive.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .danger_accept_invalid_certs(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs single-URL fetches with retry, pacing, and link extraction
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches one URL and returns the same-site links it discovers
    ///
    /// Acquires the rate limiter before every attempt, classifies the
    /// outcome, and loops per the retry policy until a terminal state.
    /// All failure terminals resolve to an empty set.
    pub async fn fetch_links(
        &self,
        url: &str,
        scope: &CrawlScope,
        limiter: &RateLimiter,
    ) -> HashSet<String> {
        let page_url = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Skipping unparseable URL {}: {}", url, e);
                return HashSet::new();
            }
        };

        let mut attempt: u32 = 0;
        loop {
            limiter.acquire().await;

            let outcome = self.attempt(url).await;
            match self.policy.decide(&outcome, attempt) {
                RetryDecision::Proceed => {
                    return match outcome {
                        FetchOutcome::Html(body) => extract_links(&body, &page_url, scope),
                        FetchOutcome::NonHtml(content_type) => {
                            tracing::debug!(
                                "Skipping non-HTML content at {} ({})",
                                url,
                                content_type
                            );
                            HashSet::new()
                        }
                        _ => unreachable!("Proceed only follows Html/NonHtml outcomes"),
                    };
                }

                RetryDecision::Skip => {
                    tracing::warn!("Failed to fetch {}: {:?}", url, outcome);
                    return HashSet::new();
                }

                RetryDecision::GiveUp => {
                    tracing::error!(
                        "Max retries reached for {} after {:?}",
                        url,
                        outcome
                    );
                    return HashSet::new();
                }

                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        "Retryable failure for {} ({:?}), backing off {:.1}s",
                        url,
                        outcome,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Sends one GET and classifies the result
    async fn attempt(&self, url: &str) -> FetchOutcome {
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .header(ACCEPT, ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .header(CACHE_CONTROL, "max-age=0");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return classify_transport_error(e),
        };

        let status = response.status().as_u16();
        if status == 429 {
            return FetchOutcome::RateLimited;
        }
        if status >= 500 {
            return FetchOutcome::ServerError(status);
        }
        if status != 200 {
            return FetchOutcome::ClientError(status);
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !content_type.contains("text/html") {
            return FetchOutcome::NonHtml(content_type);
        }

        match response.text().await {
            Ok(body) => FetchOutcome::Html(body),
            Err(e) => classify_transport_error(e),
        }
    }
}

fn classify_transport_error(error: reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::TimedOut
    } else {
        FetchOutcome::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(Duration::from_secs(30)).is_ok());
    }

    #[test]
    fn test_random_user_agent_comes_from_table() {
        for _ in 0..20 {
            assert!(USER_AGENTS.contains(&random_user_agent()));
        }
    }
}
