//! Quick LRU - A bounded in-memory cache
//!
//! Provides an LRU cache with per-entry and default TTL expiration, an
//! eviction callback, a background expiry sweep, and an HTTP facade.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheBuilder, LruCache, SetOptions, SharedCache};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
