use std::time::{Duration, Instant};

/// Represents a stored value stamped with its creation time
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    created_at: Instant,
}

impl<V> Entry<V> {
    /// Creates a new entry with the given value and creation time
    pub fn new(value: V, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// Returns a reference to the stored value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the creation time
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Checks whether this entry has outlived `ttl` as of `now`.
    ///
    /// Expired means strictly past the deadline: at `created_at + ttl == now`
    /// the entry is still live. A deadline that overflows the representable
    /// time range is unreachable, so such an entry never expires.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        match self.created_at.checked_add(ttl) {
            Some(deadline) => deadline < now,
            None => false,
        }
    }
}
