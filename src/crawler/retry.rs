//! Fetch outcome classification and retry decisions
//!
//! Every fetch attempt resolves to exactly one [`FetchOutcome`]; a pure
//! decision function maps (outcome, attempt index) to what the fetch loop
//! does next. Programming errors never enter this table — only classified
//! network/HTTP conditions do.

use crate::config::CrawlConfig;
use std::time::Duration;

/// Classified result of a single fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// 200 with an HTML body
    Html(String),

    /// 200 with a non-HTML content type; treated as success with no links
    NonHtml(String),

    /// HTTP 429
    RateLimited,

    /// HTTP 5xx
    ServerError(u16),

    /// Any other non-200 status; never retried
    ClientError(u16),

    /// Request or body read timed out
    TimedOut,

    /// Transport-level failure (connect refused, reset, TLS, ...)
    Transport(String),
}

/// What the fetch loop does after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Terminal success; process the body (or the empty non-HTML result)
    Proceed,

    /// Terminal skip with an empty result, no retry
    Skip,

    /// Sleep for the backoff duration, then attempt again
    RetryAfter(Duration),

    /// Retries exhausted; terminal with an empty result
    GiveUp,
}

/// Retry/backoff policy for one URL fetch
///
/// Backoff is exponential in the attempt index: `retry_delay * 2^n` seconds
/// for n = 0, 1, 2, ... A URL is attempted at most `max_retries + 1` times.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    retry_delay: f64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: f64) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay)
    }

    /// Backoff before the attempt following attempt `n` (0-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.retry_delay * 2f64.powi(attempt as i32))
    }

    /// Decides the next step after `outcome` on attempt `attempt` (0-based)
    pub fn decide(&self, outcome: &FetchOutcome, attempt: u32) -> RetryDecision {
        match outcome {
            FetchOutcome::Html(_) | FetchOutcome::NonHtml(_) => RetryDecision::Proceed,

            FetchOutcome::ClientError(_) => RetryDecision::Skip,

            FetchOutcome::RateLimited
            | FetchOutcome::ServerError(_)
            | FetchOutcome::TimedOut
            | FetchOutcome::Transport(_) => {
                if attempt < self.max_retries {
                    RetryDecision::RetryAfter(self.backoff(attempt))
                } else {
                    RetryDecision::GiveUp
                }
            }
        }
    }
}
