//! # TTL Cache
//!
//! A simple in-memory key-value cache with TTL (time-to-live) expiry driven
//! by an injectable clock.
//!
//! ## Features
//!
//! - Thread-safe storage using `DashMap` (lock-free concurrent access)
//! - Expiration on read (lazy cleanup, no background work)
//! - Time source injected at construction: real system clock in production,
//!   a controllable fake clock in tests, identical cache logic under both
//! - Generic over key and value types
//!
//! ## Example
//!
//! ```rust
//! use ttl_cache::{FakeClock, TtlCache};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // Production code would use TtlCache::new, which binds the system
//! // clock; tests inject a fake clock and drive it by hand.
//! let clock = FakeClock::new();
//! let cache = TtlCache::with_clock(Duration::from_secs(60), Arc::new(clock.clone()));
//!
//! // Store a value; it is stamped with the clock's current time
//! cache.set("user:123", "John Doe");
//! assert_eq!(cache.get(&"user:123"), Some("John Doe"));
//!
//! // An hour later the entry has expired and the next read collects it
//! clock.advance(Duration::from_secs(3600));
//! assert_eq!(cache.get(&"user:123"), None);
//! ```

mod cache;
mod clock;
mod entry;

pub use cache::TtlCache;
pub use clock::{Clock, ClockError, FakeClock, SystemClock};
pub use entry::Entry;
