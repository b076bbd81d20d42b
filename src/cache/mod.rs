//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration and LRU eviction.

mod builder;
mod clock;
mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::Mutex;

pub(crate) use entry::CacheEntry;
pub(crate) use lru::LruList;

// Re-export public types
pub use builder::CacheBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use stats::{CacheStats, RemovalCause};
pub use store::{EvictionListener, LruCache, SetOptions};

/// A cache shared between tasks.
///
/// One mutex guards the whole structure so the key map and the access
/// order are always updated together.
pub type SharedCache<K, V, C = SystemClock> = Arc<Mutex<LruCache<K, V, C>>>;
