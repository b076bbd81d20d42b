//! Cache Builder Module
//!
//! Validates construction parameters for [`LruCache`].

use std::hash::Hash;
use std::time::Duration;

use crate::cache::{Clock, EvictionListener, LruCache, SystemClock};
use crate::error::{CacheError, Result};

// == Cache Builder ==
/// Configures an [`LruCache`] before construction.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use quick_lru::cache::CacheBuilder;
///
/// let mut cache = CacheBuilder::new(2)
///     .max_age(Duration::from_secs(60))
///     .on_eviction(|key: String, value: u32| println!("evicted {key}={value}"))
///     .build()
///     .unwrap();
///
/// cache
///     .set("a".to_string(), 1)
///     .set("b".to_string(), 2)
///     .set("c".to_string(), 3);
/// assert!(!cache.has("a"));
/// ```
pub struct CacheBuilder<K, V, C = SystemClock> {
    max_size: usize,
    max_age: Option<Duration>,
    on_eviction: Option<EvictionListener<K, V>>,
    clock: C,
}

impl<K, V> CacheBuilder<K, V, SystemClock> {
    /// Starts a builder for a cache holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            max_age: None,
            on_eviction: None,
            clock: SystemClock,
        }
    }
}

impl<K, V, C> CacheBuilder<K, V, C> {
    /// Sets the default max age. Without one, entries never expire by time.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Registers a callback invoked once for every removed entry.
    pub fn on_eviction<F>(mut self, listener: F) -> Self
    where
        F: FnMut(K, V) + Send + 'static,
    {
        self.on_eviction = Some(Box::new(listener));
        self
    }

    /// Replaces the time source.
    pub fn clock<C2: Clock>(self, clock: C2) -> CacheBuilder<K, V, C2> {
        CacheBuilder {
            max_size: self.max_size,
            max_age: self.max_age,
            on_eviction: self.on_eviction,
            clock,
        }
    }

    /// Builds the cache.
    ///
    /// Fails with `InvalidConfiguration` when `max_size` is zero or the
    /// default max age is zero.
    pub fn build(self) -> Result<LruCache<K, V, C>>
    where
        K: Hash + Eq + Clone,
        C: Clock,
    {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfiguration(
                "max_size must be a positive integer".to_string(),
            ));
        }
        if self.max_age.is_some_and(|max_age| max_age.is_zero()) {
            return Err(CacheError::InvalidConfiguration(
                "max_age must be positive when set".to_string(),
            ));
        }

        Ok(LruCache::from_parts(
            self.max_size,
            self.max_age,
            self.on_eviction,
            self.clock,
        ))
    }
}
