//! Rate limiter implementation
//!
//! Provides fixed window rate limiting for API keys. Every request counts
//! against its window, including the ones that are refused.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::api_key::RateLimitConfig;

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Total limit for the window
    pub limit: u32,
    /// Time until the window resets (in seconds, rounded up)
    pub reset_in_seconds: u64,
    /// Requests counted in the current window, this one included
    pub count: u32,
}

/// Counter for one key
#[derive(Debug, Clone, Copy)]
struct RateLimitWindow {
    window_start: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    by_key: HashMap<String, RateLimitWindow>,
    last_cleanup: Instant,
}

/// Per-process rate limiter for API keys
///
/// Check and increment happen under one lock, so concurrent requests on the
/// same key never admit more than `max_requests` per window.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(Windows {
                by_key: HashMap::new(),
                last_cleanup: Instant::now(),
            }),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count a request for `key_id` and decide whether it may proceed
    pub async fn check(&self, key_id: &str) -> RateLimitResult {
        self.check_at(key_id, Instant::now()).await
    }

    /// Same as [`check`](Self::check) with an explicit clock
    pub async fn check_at(&self, key_id: &str, now: Instant) -> RateLimitResult {
        let mut windows = self.windows.lock().await;
        self.maybe_cleanup(&mut windows, now);

        let window_len = self.config.window;
        let entry = windows
            .by_key
            .entry(key_id.to_string())
            .or_insert(RateLimitWindow {
                window_start: now,
                count: 0,
            });

        if now.saturating_duration_since(entry.window_start) >= window_len {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count = entry.count.saturating_add(1);

        let limit = self.config.max_requests;
        let elapsed = now.saturating_duration_since(entry.window_start);
        let reset_in = window_len.saturating_sub(elapsed);

        RateLimitResult {
            allowed: entry.count <= limit,
            remaining: limit.saturating_sub(entry.count),
            limit,
            reset_in_seconds: ceil_secs(reset_in),
            count: entry.count,
        }
    }

    /// Number of keys with a live window
    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.by_key.len()
    }

    /// Purge elapsed windows, at most once per window length
    fn maybe_cleanup(&self, windows: &mut Windows, now: Instant) {
        let window_len = self.config.window;
        if now.saturating_duration_since(windows.last_cleanup) < window_len {
            return;
        }

        windows.last_cleanup = now;
        windows
            .by_key
            .retain(|_, w| now.saturating_duration_since(w.window_start) < window_len);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 { secs + 1 } else { secs }
}
