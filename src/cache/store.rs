//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::cache::{CacheBuilder, CacheEntry, CacheStats, Clock, LruList, RemovalCause, SystemClock};
use crate::error::Result;

/// Callback invoked with the key and last stored value of every removed entry.
pub type EvictionListener<K, V> = Box<dyn FnMut(K, V) + Send>;

// == Set Options ==
/// Per-call options for [`LruCache::set_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOptions {
    /// Max age for this entry only. `None` or zero falls back to the cache default.
    pub max_age: Option<Duration>,
}

impl SetOptions {
    /// Options overriding the max age of a single entry.
    pub fn max_age(max_age: Duration) -> Self {
        Self {
            max_age: Some(max_age),
        }
    }
}

// == LRU Cache ==
/// Bounded key/value cache with LRU eviction and TTL support.
///
/// Expiry is lazy: an expired entry stays in memory until a read touches it
/// or [`purge_expired`](Self::purge_expired) runs, but no read ever returns it.
pub struct LruCache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Access order, least recently used first
    order: LruList<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Default max age for entries without an override
    max_age: Option<Duration>,
    on_eviction: Option<EvictionListener<K, V>>,
    clock: C,
}

impl<K, V> LruCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries that never expire.
    ///
    /// Fails with `InvalidConfiguration` when `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        CacheBuilder::new(max_size).build()
    }

    /// Starts configuring a cache holding at most `max_size` entries.
    pub fn builder(max_size: usize) -> CacheBuilder<K, V> {
        CacheBuilder::new(max_size)
    }
}

impl<K, V, C> LruCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    pub(crate) fn from_parts(
        max_size: usize,
        max_age: Option<Duration>,
        on_eviction: Option<EvictionListener<K, V>>,
        clock: C,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            order: LruList::new(),
            stats: CacheStats::new(),
            max_size,
            max_age,
            on_eviction,
            clock,
        }
    }

    // == Set ==
    /// Stores a key-value pair using the cache's default max age.
    ///
    /// See [`set_with`](Self::set_with).
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        self.set_with(key, value, SetOptions::default())
    }

    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is replaced in place, its age is
    /// reset and it becomes most recently used; the eviction callback is not
    /// invoked. If the key is new and the cache is full, the least recently
    /// used entry is evicted first.
    pub fn set_with(&mut self, key: K, value: V, options: SetOptions) -> &mut Self {
        let now = self.clock.now_ms();
        let max_age = options
            .max_age
            .filter(|max_age| !max_age.is_zero())
            .or(self.max_age);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, now, max_age);
            self.order.touch(entry.slot);
            return self;
        }

        while self.entries.len() >= self.max_size {
            if !self.evict_oldest() {
                break;
            }
        }

        let slot = self.order.push_back(key.clone());
        self.entries.insert(key, CacheEntry::new(value, now, max_age, slot));
        self.stats.set_total_entries(self.entries.len());
        debug_assert_eq!(self.order.len(), self.entries.len());
        self
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Expired entries are removed, reported to the eviction callback and
    /// counted as misses.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.purge_if_expired(key) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                self.order.touch(entry.slot);
                self.stats.record_hit();
                Some(&entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a value without changing its recency.
    ///
    /// Expired entries are removed exactly as in [`get`](Self::get).
    pub fn peek<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.purge_if_expired(key) {
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Has ==
    /// Checks whether a live entry exists for `key`, purging it if expired.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        !self.purge_if_expired(key) && self.entries.contains_key(key)
    }

    // == Time To Live ==
    /// Returns how long the entry for `key` has left to live.
    ///
    /// None if the key is absent or its entry never expires. Does not purge
    /// or touch recency; an expired but unpurged entry reports zero.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.entries.get(key)?.ttl_remaining(now)
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true if an entry was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key, RemovalCause::Explicit)
    }

    // == Clear ==
    /// Removes every entry, notifying the eviction callback once per entry.
    pub fn clear(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        self.order.clear();
        self.stats.set_total_entries(0);

        for (key, entry) in entries {
            self.notify(key, entry.value, RemovalCause::Cleared);
        }
    }

    // == Resize ==
    /// Changes the capacity, evicting least recently used entries until the
    /// current contents fit.
    pub fn resize(&mut self, max_size: NonZeroUsize) {
        self.max_size = max_size.get();
        while self.entries.len() > self.max_size {
            if !self.evict_oldest() {
                break;
            }
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.remove(&key, RemovalCause::Expired);
        }
        count
    }

    // == Snapshots ==
    /// Iterates keys in arbitrary order.
    ///
    /// Expired entries that have not been purged yet may appear.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Iterates values in arbitrary order.
    ///
    /// Expired entries that have not been purged yet may appear.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().map(|entry| &entry.value)
    }

    /// Iterates key-value pairs in arbitrary order.
    ///
    /// Expired entries that have not been purged yet may appear.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(key, entry)| (key, &entry.value))
    }

    /// Iterates key-value pairs from least to most recently used.
    pub fn entries_ascending(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().filter_map(move |key| self.lookup(key))
    }

    /// Iterates key-value pairs from most to least recently used.
    pub fn entries_descending(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.order.iter().rev().filter_map(move |key| self.lookup(key))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Accessors ==
    /// Returns the current number of entries, including unpurged expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configured capacity.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the default max age, None = entries never expire.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    fn lookup<'a>(&'a self, key: &'a K) -> Option<(&'a K, &'a V)> {
        self.entries.get(key).map(|entry| (key, &entry.value))
    }

    /// Removes `key` if it has expired. Returns true if it was removed.
    fn purge_if_expired<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(now));

        expired && self.remove(key, RemovalCause::Expired)
    }

    /// Evicts the least recently used entry. Returns false if there was none.
    fn evict_oldest(&mut self) -> bool {
        let Some(key) = self.order.pop_front() else {
            return false;
        };
        if let Some(entry) = self.entries.remove(&key) {
            self.stats.set_total_entries(self.entries.len());
            self.notify(key, entry.value, RemovalCause::Capacity);
        }
        true
    }

    fn remove<Q>(&mut self, key: &Q, cause: RemovalCause) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some((key, entry)) = self.entries.remove_entry(key) else {
            return false;
        };
        self.order.remove(entry.slot);
        self.stats.set_total_entries(self.entries.len());
        self.notify(key, entry.value, cause);
        true
    }

    fn notify(&mut self, key: K, value: V, cause: RemovalCause) {
        self.stats.record_removal(cause);
        if let Some(listener) = self.on_eviction.as_mut() {
            listener(key, value);
        }
    }
}

impl<K, V, C> fmt::Debug for LruCache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("max_age", &self.max_age)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
