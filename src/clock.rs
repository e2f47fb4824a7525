//! Injectable wall clock.
//!
//! The time resolver samples "now" exactly once per recompute through a
//! [`Clock`], so tests and the CLI's `--now` flag can pin it.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: AtomicI64,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    /// Pin the clock at whole epoch seconds. Out-of-range values saturate.
    #[must_use]
    pub const fn at_secs(secs: i64) -> Self {
        Self::new(secs.saturating_mul(1000))
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::Relaxed);
    }

    pub fn advance(&self, by_ms: i64) {
        self.now_ms.fetch_add(by_ms, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_moves_only_on_request() {
        let clock = FixedClock::at_secs(1_700_000_000);
        assert_eq!(clock.now_ms(), 1_700_000_000_000);
        assert_eq!(FixedClock::at_secs(i64::MAX / 100).now_ms(), i64::MAX);
        assert_eq!(FixedClock::at_secs(i64::MIN).now_ms(), i64::MIN);
        clock.advance(1_500);
        assert_eq!(clock.now_ms(), 1_700_000_001_500);
        clock.set(42);
        assert_eq!(clock.now_ms(), 42);
    }

    #[test]
    fn test_shared_clock() {
        let clock = Arc::new(FixedClock::new(10));
        let shared: Arc<FixedClock> = Arc::clone(&clock);
        clock.advance(5);
        assert_eq!(shared.now_ms(), 15);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
