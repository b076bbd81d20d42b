//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Timestamp of the last write (milliseconds)
    pub stored_at: u64,
    /// Effective time-to-live, None = no expiration
    pub max_age: Option<Duration>,
    /// Position in the access-order list
    pub(crate) slot: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry written at `now`.
    pub(crate) fn new(value: V, now: u64, max_age: Option<Duration>, slot: usize) -> Self {
        Self {
            value,
            stored_at: now,
            max_age,
            slot,
        }
    }

    // == Refresh ==
    /// Replaces the value in place and restarts the entry's age.
    pub(crate) fn refresh(&mut self, value: V, now: u64, max_age: Option<Duration>) {
        self.value = value;
        self.stored_at = now;
        self.max_age = max_age;
    }

    // == Age ==
    /// Returns the time elapsed since the last write.
    ///
    /// A clock reading earlier than `stored_at` yields zero rather than a
    /// negative age.
    pub fn age(&self, now: u64) -> Duration {
        Duration::from_millis(now.saturating_sub(self.stored_at))
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once its age is greater than
    /// or equal to its max age.
    pub fn is_expired(&self, now: u64) -> bool {
        match self.max_age {
            Some(max_age) => self.age(now) >= max_age,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self, now: u64) -> Option<Duration> {
        self.max_age.map(|max_age| max_age.saturating_sub(self.age(now)))
    }
}
