// Fixed-window rate limiting for the login path
//
// In-memory, per client address. State is process-local and resets on
// restart; fine for a single-instance deployment.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default limit: 10 attempts per address per 15-minute window
pub const MAX_LOGIN_ATTEMPTS: u32 = 10;
pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Throttled,
}

struct AttemptWindow {
    count: u32,
    window_start: Instant,
}

/// Login rate limiter, shared across requests via the app state
///
/// Fixed window: a boundary crossed mid-burst resets the counter, no
/// sliding-window smoothing. The mutex serializes increments so
/// concurrent bursts from one address cannot undercount.
#[derive(Clone)]
pub struct LoginRateLimiter {
    max_attempts: u32,
    window: Duration,
    state: Arc<Mutex<HashMap<IpAddr, AttemptWindow>>>,
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            state: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check an attempt from the given address
    ///
    /// Counts the attempt when allowed; a throttled attempt is not
    /// counted and does not extend the window.
    pub fn check(&self, addr: IpAddr) -> RateDecision {
        let mut state = self.state.lock();
        let now = Instant::now();

        // Evict windows stale for more than a full extra window so the
        // map does not accumulate one-off addresses
        let window = self.window;
        state.retain(|_, entry| now.duration_since(entry.window_start) < window * 2);

        let entry = state.entry(addr).or_insert(AttemptWindow {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_attempts {
            RateDecision::Throttled
        } else {
            entry.count += 1;
            RateDecision::Allowed
        }
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(MAX_LOGIN_ATTEMPTS, LOGIN_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_ten_attempts_allowed_eleventh_throttled() {
        let limiter = LoginRateLimiter::default();
        let ip = addr("127.0.0.1");

        for _ in 0..10 {
            assert_eq!(limiter.check(ip), RateDecision::Allowed);
        }
        assert_eq!(limiter.check(ip), RateDecision::Throttled);
    }

    #[test]
    fn test_addresses_are_limited_independently() {
        let limiter = LoginRateLimiter::new(2, Duration::from_secs(60));

        assert_eq!(limiter.check(addr("10.0.0.1")), RateDecision::Allowed);
        assert_eq!(limiter.check(addr("10.0.0.1")), RateDecision::Allowed);
        assert_eq!(limiter.check(addr("10.0.0.1")), RateDecision::Throttled);

        // A different client is unaffected
        assert_eq!(limiter.check(addr("10.0.0.2")), RateDecision::Allowed);
    }

    #[test]
    fn test_window_boundary_resets_counter() {
        let limiter = LoginRateLimiter::new(2, Duration::from_millis(20));
        let ip = addr("127.0.0.1");

        assert_eq!(limiter.check(ip), RateDecision::Allowed);
        assert_eq!(limiter.check(ip), RateDecision::Allowed);
        assert_eq!(limiter.check(ip), RateDecision::Throttled);

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(limiter.check(ip), RateDecision::Allowed);
    }

    #[test]
    fn test_throttled_attempts_do_not_count() {
        let limiter = LoginRateLimiter::new(1, Duration::from_secs(60));
        let ip = addr("127.0.0.1");

        assert_eq!(limiter.check(ip), RateDecision::Allowed);
        for _ in 0..5 {
            assert_eq!(limiter.check(ip), RateDecision::Throttled);
        }
    }

    #[test]
    fn test_concurrent_burst_is_counted_exactly() {
        let limiter = LoginRateLimiter::new(10, Duration::from_secs(60));
        let ip = addr("127.0.0.1");

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || limiter.check(ip))
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|d| *d == RateDecision::Allowed)
            .count();

        // No undercounting under a concurrent burst: exactly the
        // limit gets through
        assert_eq!(allowed, 10);
    }
}
