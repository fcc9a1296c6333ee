use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;

/// Internal shared state for the cache
struct CacheInner<K, V> {
    entries: DashMap<K, Entry<V>>,
    /// Lifetime shared by all entries, fixed at construction
    ttl: Duration,
    /// Injected time source; the cache never reads the OS clock directly
    clock: Arc<dyn Clock>,
}

/// Thread-safe in-memory key-value cache with time-based expiry.
///
/// Uses `DashMap` for concurrent access. Reads never block other reads, and
/// writes only block access to the specific key being written.
///
/// Every entry is stamped with the clock's time at the moment it is stored,
/// and is live until `created_at + ttl` has strictly passed. Expiry is
/// observed lazily: an expired entry is removed when a lookup touches its
/// key, never by background work, so [`len`](TtlCache::len) is an upper
/// bound on the number of live entries.
///
/// The clock is a construction-time dependency. Binding a [`FakeClock`]
/// makes expiration fully deterministic in tests; with [`SystemClock`] the
/// logic is identical, only the time source differs.
///
/// # Example
///
/// ```rust
/// use ttl_cache::{FakeClock, TtlCache};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = FakeClock::new();
/// let cache = TtlCache::with_clock(Duration::from_secs(300), Arc::new(clock.clone()));
///
/// cache.set("user:123", "John Doe");
/// assert_eq!(cache.get(&"user:123"), Some("John Doe"));
///
/// clock.advance(Duration::from_secs(301));
/// assert_eq!(cache.get(&"user:123"), None);
/// ```
///
/// [`FakeClock`]: crate::FakeClock
/// [`SystemClock`]: crate::SystemClock
pub struct TtlCache<K, V> {
    inner: Arc<CacheInner<K, V>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates a cache bound to the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache bound to the given clock.
    ///
    /// The clock is shared with the caller, which keeps its own handle to
    /// drive it in tests.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: DashMap::new(),
                ttl,
                clock,
            }),
        }
    }

    /// Returns the configured entry lifetime
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Stores a value under the given key.
    ///
    /// If the key already exists, the entry is replaced wholesale; its
    /// creation stamp is reset to the clock's current time, so the new
    /// value gets a full lifetime.
    pub fn set(&self, key: K, value: V) {
        let entry = Entry::new(value, self.inner.clock.now());
        self.inner.entries.insert(key, entry);
    }

    /// Retrieves the value stored under a key.
    ///
    /// Returns `None` if the key is absent or its entry has expired; the two
    /// cases are indistinguishable to the caller. An expired entry is
    /// removed on the way out. A successful read leaves the entry untouched,
    /// it does not refresh the creation stamp.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let now = self.inner.clock.now();
        let ttl = self.inner.ttl;
        let entry = self.inner.entries.get(key)?;

        if entry.value().is_expired(ttl, now) {
            // Drop the read reference before removing
            drop(entry);
            // Use remove_if to atomically re-verify expiration and remove.
            // This prevents a race where another thread replaces the entry
            // between our check and removal, which would delete a live value.
            if self
                .inner
                .entries
                .remove_if(key, |_, e| e.is_expired(ttl, now))
                .is_some()
            {
                tracing::debug!("removed expired entry on read");
            }
            return None;
        }

        Some(entry.value().value().clone())
    }

    /// Checks if a key exists and is not expired.
    ///
    /// Expired entries are lazily removed when checked, same as on `get`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        let now = self.inner.clock.now();
        let ttl = self.inner.ttl;

        match self.inner.entries.get(key) {
            Some(entry) => {
                if entry.value().is_expired(ttl, now) {
                    drop(entry);
                    self.inner
                        .entries
                        .remove_if(key, |_, e| e.is_expired(ttl, now));
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Deletes a key from the cache.
    ///
    /// Returns `true` if the key was present (regardless of expiration),
    /// `false` otherwise.
    #[must_use = "returns whether the key was present"]
    pub fn remove(&self, key: &K) -> bool {
        self.inner.entries.remove(key).is_some()
    }

    /// Deletes all entries from the cache.
    ///
    /// Returns the approximate number of entries removed. The count may be
    /// off in concurrent scenarios where other threads add or remove
    /// entries between the count and the clear; for a cache this is
    /// informational.
    pub fn clear(&self) -> usize {
        let count = self.inner.entries.len();
        self.inner.entries.clear();
        tracing::debug!(removed = count, "cleared cache");
        count
    }

    /// Returns the number of entries in the cache, including expired ones
    /// that no lookup has collected yet
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Returns `true` if the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the keys of all entries that are not expired
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let now = self.inner.clock.now();
        let ttl = self.inner.ttl;

        self.inner
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(ttl, now))
            .map(|entry| entry.key().clone())
            .collect()
    }
}
