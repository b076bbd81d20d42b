//! API Handlers
//!
//! HTTP request handlers for each cache operation.
//!
//! Handlers are generic over the cache's clock so tests can drive expiry
//! with a manual clock. Malformed bodies and query strings are turned into
//! `CacheError::InvalidRequest` so every failure renders as a JSON error.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheBuilder, Clock, LruCache, SharedCache, SystemClock};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ClearResponse, DeleteResponse, EntriesQuery, EntriesResponse, EntryOrder,
    ExistsResponse, GetResponse, HealthResponse, ResizeRequest, ResizeResponse, SetRequest,
    SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one cache instance the server owns; every handler goes
/// through its mutex.
pub struct AppState<C = SystemClock> {
    /// Shared cache of JSON values
    pub cache: SharedCache<String, Value, C>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C: Clock> AppState<C> {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: LruCache<String, Value, C>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }
}

impl AppState {
    /// Creates a new AppState from configuration.
    ///
    /// Evictions are logged at debug level.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = CacheBuilder::new(config.max_size)
            .on_eviction(|key: String, _value: Value| debug!("Evicted cache entry '{}'", key));
        if let Some(max_age) = config.max_age() {
            builder = builder.max_age(max_age);
        }
        Ok(Self::new(builder.build()?))
    }
}

fn checked_key(key: String) -> Result<String> {
    match validate_key(&key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(key),
    }
}

/// Handler for PUT /cache/:key
///
/// Stores a JSON value under `key` with an optional per-entry max age.
pub async fn set_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
    payload: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<SetResponse>> {
    let key = checked_key(key)?;
    let Json(req) = payload?;
    let options = req.options();

    let mut cache = state.cache.lock().await;
    cache.set_with(key.clone(), req.value, options);

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /cache/:key
///
/// Retrieves a value and marks it most recently used.
pub async fn get_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    let Some(value) = cache.get(&key).cloned() else {
        return Err(CacheError::NotFound(key));
    };
    let ttl = cache.ttl_remaining(&key);
    Ok(Json(GetResponse::new(key, value).with_ttl(ttl)))
}

/// Handler for GET /cache/:key/peek
///
/// Retrieves a value without changing its recency.
pub async fn peek_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    let Some(value) = cache.peek(&key).cloned() else {
        return Err(CacheError::NotFound(key));
    };
    let ttl = cache.ttl_remaining(&key);
    Ok(Json(GetResponse::new(key, value).with_ttl(ttl)))
}

/// Handler for GET /cache/:key/exists
pub async fn exists_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Json<ExistsResponse> {
    let exists = state.cache.lock().await.has(&key);
    Json(ExistsResponse { key, exists })
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler<C: Clock>(
    State(state): State<AppState<C>>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.lock().await;
    if cache.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for GET /cache
///
/// Lists a snapshot of all entries, optionally in access order.
pub async fn entries_handler<C: Clock>(
    State(state): State<AppState<C>>,
    query: std::result::Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<EntriesResponse>> {
    let Query(query) = query?;

    let cache = state.cache.lock().await;
    let response = match query.order {
        EntryOrder::Unordered => EntriesResponse::new(query.order, cache.entries()),
        EntryOrder::Ascending => EntriesResponse::new(query.order, cache.entries_ascending()),
        EntryOrder::Descending => EntriesResponse::new(query.order, cache.entries_descending()),
    };
    Ok(Json(response))
}

/// Handler for DELETE /cache
///
/// Removes every entry.
pub async fn clear_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<ClearResponse> {
    let mut cache = state.cache.lock().await;
    let cleared = cache.len();
    cache.clear();
    Json(ClearResponse { cleared })
}

/// Handler for PUT /capacity
///
/// Changes the cache capacity, evicting least recently used entries if needed.
pub async fn resize_handler<C: Clock>(
    State(state): State<AppState<C>>,
    payload: std::result::Result<Json<ResizeRequest>, JsonRejection>,
) -> Result<Json<ResizeResponse>> {
    let Json(req) = payload?;
    let capacity = req.capacity().map_err(CacheError::InvalidRequest)?;

    let mut cache = state.cache.lock().await;
    cache.resize(capacity);

    Ok(Json(ResizeResponse {
        max_size: cache.max_size(),
        total_entries: cache.len(),
    }))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler<C: Clock>(State(state): State<AppState<C>>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    Json(StatsResponse::new(&cache.stats(), cache.max_size()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
