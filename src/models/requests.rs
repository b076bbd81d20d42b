//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::SetOptions;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Validates a cache key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!("Key exceeds maximum length of {} bytes", MAX_KEY_LENGTH));
    }
    None
}

/// Request body for the SET operation (PUT /cache/:key)
///
/// # Fields
/// - `value`: Any JSON value to store
/// - `max_age_ms`: Optional per-entry max age in milliseconds (uses the cache default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: Value,
    /// Optional max age in milliseconds
    #[serde(default)]
    pub max_age_ms: Option<u64>,
}

impl SetRequest {
    /// Converts the request into per-entry cache options.
    pub fn options(&self) -> SetOptions {
        SetOptions {
            max_age: self.max_age_ms.map(Duration::from_millis),
        }
    }
}

/// Request body for the RESIZE operation (PUT /capacity)
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// New maximum number of entries
    pub max_size: usize,
}

impl ResizeRequest {
    /// Returns the validated capacity, or an error message if it is zero.
    pub fn capacity(&self) -> Result<NonZeroUsize, String> {
        NonZeroUsize::new(self.max_size).ok_or_else(|| "max_size must be positive".to_string())
    }
}

/// Ordering of a snapshot listing (GET /cache?order=...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrder {
    /// Arbitrary order
    #[default]
    Unordered,
    /// Least to most recently used
    Ascending,
    /// Most to least recently used
    Descending,
}

/// Query string for the snapshot listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    #[serde(default)]
    pub order: EntryOrder,
}
