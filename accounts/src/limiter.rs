//! Sliding-window login-attempt limiting.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

/// Default: 5 attempts per 5-minute window.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_WINDOW_SECS: u64 = 5 * 60;

/// Current epoch seconds.
fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Per-principal sliding-window attempt limiter.
///
/// Every attempt counts against the window, successful or not; a blocked
/// attempt reports how long until the oldest counted attempt ages out.
#[derive(Debug)]
pub struct LoginRateLimiter {
    max_attempts: u32,
    window_secs: u64,
    attempts: Mutex<HashMap<String, Vec<u64>>>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, Duration::from_secs(DEFAULT_WINDOW_SECS))
    }
}

impl LoginRateLimiter {
    /// Create a limiter allowing `max_attempts` per `window`.
    #[must_use]
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window_secs: window.as_secs(),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Record an attempt for `key`, or report how long until one is
    /// admitted again.
    pub fn try_acquire(&self, key: &str) -> Result<(), Duration> {
        let now = now_secs();
        let window_start = now.saturating_sub(self.window_secs);

        let mut attempts = self.attempts.lock();
        let timestamps = attempts.entry(key.to_string()).or_default();
        timestamps.retain(|&ts| ts >= window_start);

        if timestamps.len() >= self.max_attempts as usize {
            let oldest = timestamps.first().copied().unwrap_or(now);
            let retry_after = (oldest + self.window_secs).saturating_sub(now);
            return Err(Duration::from_secs(retry_after.max(1)));
        }

        timestamps.push(now);
        Ok(())
    }

    /// Clear a principal's window.
    pub fn reset(&self, key: &str) {
        self.attempts.lock().remove(key);
    }

    /// Drop principals whose every attempt has aged out of the window.
    pub fn cleanup_stale(&self) {
        let window_start = now_secs().saturating_sub(self.window_secs);
        self.attempts
            .lock()
            .retain(|_, timestamps| timestamps.iter().any(|&ts| ts >= window_start));
    }

    /// Number of principals with attempts in the current window.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.attempts.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_within_limit() {
        let limiter = LoginRateLimiter::new(5, Duration::from_secs(60));
        for _ in 0..5 {
            assert!(limiter.try_acquire("alice").is_ok());
        }
    }

    #[test]
    fn blocks_at_limit_with_retry_hint() {
        let limiter = LoginRateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            limiter.try_acquire("alice").unwrap();
        }
        let retry_after = limiter.try_acquire("alice").unwrap_err();
        assert!(retry_after.as_secs() >= 1);
        assert!(retry_after.as_secs() <= 60);
    }

    #[test]
    fn separate_keys_tracked_independently() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        limiter.try_acquire("alice").unwrap();
        assert!(limiter.try_acquire("alice").is_err());
        assert!(limiter.try_acquire("bob").is_ok());
    }

    #[test]
    fn reset_readmits_immediately() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        limiter.try_acquire("alice").unwrap();
        assert!(limiter.try_acquire("alice").is_err());

        limiter.reset("alice");
        assert!(limiter.try_acquire("alice").is_ok());
    }

    #[test]
    fn cleanup_removes_aged_out_principals() {
        let limiter = LoginRateLimiter::new(3, Duration::from_secs(60));
        limiter.try_acquire("alice").unwrap();
        assert_eq!(limiter.tracked(), 1);

        // Artificially age every recorded attempt out of the window.
        limiter
            .attempts
            .lock()
            .values_mut()
            .for_each(|timestamps| timestamps.iter_mut().for_each(|ts| *ts = 0));

        limiter.cleanup_stale();
        assert_eq!(limiter.tracked(), 0);
    }

    #[test]
    fn a_fresh_window_readmits() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        limiter.try_acquire("alice").unwrap();
        assert!(limiter.try_acquire("alice").is_err());

        // Age the attempt past the window boundary.
        limiter
            .attempts
            .lock()
            .values_mut()
            .for_each(|timestamps| timestamps.iter_mut().for_each(|ts| *ts = 0));

        assert!(limiter.try_acquire("alice").is_ok());
    }
}
