//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;
use crate::models::EntryOrder;

/// Response body for GET /cache/:key and GET /cache/:key/peek
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
    /// Remaining lifetime in milliseconds, omitted for entries that never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            ttl_ms: None,
        }
    }

    /// Attaches the entry's remaining lifetime.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl_ms = ttl.map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

/// Response body for the SET operation (PUT /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for GET /cache/:key/exists
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

/// A single key-value pair in a snapshot listing
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub key: String,
    pub value: Value,
}

/// Response body for the snapshot listing (GET /cache)
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    /// Order the entries are listed in
    pub order: EntryOrder,
    /// Number of entries listed
    pub count: usize,
    pub entries: Vec<EntryView>,
}

impl EntriesResponse {
    /// Creates a new EntriesResponse from `(key, value)` pairs
    pub fn new<'a>(
        order: EntryOrder,
        pairs: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> Self {
        let entries: Vec<EntryView> = pairs
            .map(|(key, value)| EntryView {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        Self {
            order,
            count: entries.len(),
            entries,
        }
    }
}

/// Response body for the CLEAR operation (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Number of entries removed
    pub cleared: usize,
}

/// Response body for the RESIZE operation (PUT /capacity)
#[derive(Debug, Clone, Serialize)]
pub struct ResizeResponse {
    /// The new capacity
    pub max_size: usize,
    /// Entries remaining after the resize
    pub total_entries: usize,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity evictions
    pub evictions: u64,
    /// Number of expired entries purged
    pub expirations: u64,
    /// Number of entries deleted or cleared
    pub removals: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, max_size: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            removals: stats.removals,
            total_entries: stats.total_entries,
            max_size,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp, serialized as RFC 3339
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("search:paris", json!({"hotels": 12}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["key"], "search:paris");
        assert_eq!(json["value"]["hotels"], 12);
        assert!(json.get("ttl_ms").is_none());
    }

    #[test]
    fn test_get_response_with_ttl() {
        let resp = GetResponse::new("k", json!(1)).with_ttl(Some(Duration::from_millis(1500)));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ttl_ms"], 1500);
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_entries_response_counts() {
        let pairs = vec![
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!("two")),
        ];
        let resp = EntriesResponse::new(EntryOrder::Ascending, pairs.iter().map(|(k, v)| (k, v)));

        assert_eq!(resp.count, 2);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["order"], "ascending");
        assert_eq!(json["entries"][1]["value"], "two");
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            removals: 1,
            total_entries: 100,
        };
        let resp = StatsResponse::new(&stats, 1000);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.max_size, 1000);
        assert_eq!(resp.expirations, 2);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
