//! Per-domain request pacing
//!
//! One [`RateLimiter`] belongs to exactly one domain crawl; it is never
//! shared across domains or reused between runs.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between successive fetch starts
///
/// `acquire` serializes concurrent callers: the wait happens while holding
/// the internal lock, so under contention the effective inter-grant spacing
/// is still at least `delay` rather than collapsing under a race.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    last_grant: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_grant: Mutex::new(None),
        }
    }

    /// Blocks until at least `delay` has elapsed since the previous grant,
    /// then records the new grant time
    pub async fn acquire(&self) {
        let mut last = self.last_grant.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.delay;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(5));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now() - start, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_grants_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        // Two waits of one second each after the immediate first grant
        assert!(Instant::now() - start >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_are_serialized() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));
        let grants = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            let grants = Arc::clone(&grants);
            handles.push(tokio::spawn(async move {
                limiter.acquire().await;
                grants.lock().await.push(Instant::now());
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut times = grants.lock().await.clone();
        times.sort();
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_delay_has_passed() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        limiter.acquire().await;

        tokio::time::sleep(Duration::from_secs(2)).await;

        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(Instant::now() - start, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_never_blocks() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.acquire().await;
        }
        assert_eq!(Instant::now() - start, Duration::ZERO);
    }
}
