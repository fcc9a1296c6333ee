//! Time source abstraction.
//!
//! The cache never reads the operating system clock directly; it asks a
//! [`Clock`] it was constructed with. Production code binds [`SystemClock`],
//! tests bind a [`FakeClock`] and move time forward explicitly, so expiration
//! can be exercised without real elapsed time.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Error type for clock operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Attempted to move a fake clock to an instant earlier than its current one
    #[error("cannot move clock backwards (target is {0:?} before the current instant)")]
    Backwards(Duration),
}

/// A source of the current time.
///
/// Exactly one required operation. Implementations must be shareable across
/// threads, since callers typically hold the clock in an `Arc` alongside the
/// cache.
pub trait Clock: Send + Sync {
    /// Returns the current logical time
    fn now(&self) -> Instant;
}

/// Real system clock, delegating to [`Instant::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Controllable clock for tests.
///
/// Holds an internal instant that only moves when told to. Clones share the
/// same instant, so a test driver can keep one handle and advance time while
/// the cache under test reads the other.
///
/// # Example
///
/// ```rust
/// use ttl_cache::{Clock, FakeClock};
/// use std::time::Duration;
///
/// let clock = FakeClock::new();
/// let start = clock.now();
///
/// clock.advance(Duration::from_secs(90));
/// assert_eq!(clock.now(), start + Duration::from_secs(90));
/// ```
#[derive(Debug, Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
}

impl FakeClock {
    /// Creates a fake clock starting at the present instant
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a fake clock starting at the given instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `delta`.
    ///
    /// Advancing is the only way the clock moves; `Duration` is unsigned, so
    /// a backwards step cannot be expressed here. Safe to call from a
    /// different thread than the one reading `now`.
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += delta;
    }

    /// Repositions the clock at `to`.
    ///
    /// The clock never rewinds: a target earlier than the current instant is
    /// rejected with [`ClockError::Backwards`] and the reported time is left
    /// unchanged. Setting the current instant again is a no-op.
    pub fn set_time(&self, to: Instant) -> Result<(), ClockError> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if to < *current {
            return Err(ClockError::Backwards(*current - to));
        }
        *current = to;
        Ok(())
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fake_clock_stands_still() {
        let clock = FakeClock::new();
        let first = clock.now();
        let second = clock.now();

        assert_eq!(first, second);
    }

    #[test]
    fn test_advance_moves_forward() {
        let clock = FakeClock::new();
        let start = clock.now();

        clock.advance(Duration::from_secs(5));

        assert_eq!(clock.now(), start + Duration::from_secs(5));
    }

    #[test]
    fn test_advance_accumulates() {
        let clock = FakeClock::new();
        let start = clock.now();

        clock.advance(Duration::from_secs(30));
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.now(), start + Duration::from_millis(30_500));
    }

    #[test]
    fn test_set_time_forward() {
        let clock = FakeClock::new();
        let target = clock.now() + Duration::from_secs(3600);

        clock.set_time(target).unwrap();

        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_set_time_to_current_instant_is_noop() {
        let clock = FakeClock::new();
        let now = clock.now();

        clock.set_time(now).unwrap();

        assert_eq!(clock.now(), now);
    }

    #[test]
    fn test_set_time_backwards_rejected() {
        let clock = FakeClock::new();
        clock.advance(Duration::from_secs(10));
        let before_attempt = clock.now();

        let result = clock.set_time(before_attempt - Duration::from_secs(1));

        assert_eq!(result, Err(ClockError::Backwards(Duration::from_secs(1))));
        // Reported time is unchanged after the rejection
        assert_eq!(clock.now(), before_attempt);
    }

    #[test]
    fn test_clones_share_the_same_instant() {
        let clock = FakeClock::new();
        let handle = clock.clone();

        clock.advance(Duration::from_secs(42));

        assert_eq!(handle.now(), clock.now());
    }

    #[test]
    fn test_advance_from_another_thread() {
        let clock = FakeClock::new();
        let start = clock.now();

        let handle = clock.clone();
        thread::spawn(move || {
            handle.advance(Duration::from_secs(7));
        })
        .join()
        .expect("Thread panicked");

        assert_eq!(clock.now(), start + Duration::from_secs(7));
    }

    #[test]
    fn test_system_clock_never_decreases() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
