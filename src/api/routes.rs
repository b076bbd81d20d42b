//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::cache::Clock;

use super::handlers::{
    clear_handler, delete_handler, entries_handler, exists_handler, get_handler, health_handler,
    peek_handler, resize_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cache` - List entries (`?order=unordered|ascending|descending`)
/// - `DELETE /cache` - Clear the cache
/// - `PUT /cache/:key` - Store a value
/// - `GET /cache/:key` - Retrieve a value
/// - `DELETE /cache/:key` - Delete a key
/// - `GET /cache/:key/peek` - Retrieve a value without touching recency
/// - `GET /cache/:key/exists` - Check whether a key is live
/// - `PUT /capacity` - Resize the cache
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, so browser frontends can call it directly
/// - Tracing: Logs all requests for debugging
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: Clock + Send + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", get(entries_handler::<C>).delete(clear_handler::<C>))
        .route(
            "/cache/:key",
            get(get_handler::<C>)
                .put(set_handler::<C>)
                .delete(delete_handler::<C>),
        )
        .route("/cache/:key/peek", get(peek_handler::<C>))
        .route("/cache/:key/exists", get(exists_handler::<C>))
        .route("/capacity", put(resize_handler::<C>))
        .route("/stats", get(stats_handler::<C>))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
