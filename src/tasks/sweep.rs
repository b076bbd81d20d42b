//! Expiry Sweep Task
//!
//! Background task that periodically purges expired cache entries.
//!
//! Reads already ignore expired entries, so the sweep only bounds how long
//! they keep occupying memory.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, SharedCache};

/// Floor for the pause between sweeps.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between runs
/// and taking the cache's mutex for each purge. Each purged entry is
/// reported to the cache's eviction callback. Intervals below one
/// millisecond are raised to one millisecond.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(Mutex::new(LruCache::new(1000)?));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<K, V, C>(cache: SharedCache<K, V, C>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
    C: Clock + Send + 'static,
{
    let interval = sweep_interval(interval);
    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.lock().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

fn sweep_interval(requested: Duration) -> Duration {
    requested.max(MIN_SWEEP_INTERVAL)
}
