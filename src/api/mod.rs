//! API Module
//!
//! HTTP handlers and routing exposing every cache operation as JSON endpoints.
//!
//! # Endpoints
//! - `PUT /cache/:key` - Store a value
//! - `GET /cache/:key` - Retrieve a value
//! - `GET /cache/:key/peek` - Retrieve without touching recency
//! - `GET /cache/:key/exists` - Existence check
//! - `DELETE /cache/:key` - Delete a key
//! - `GET /cache` - List entries
//! - `DELETE /cache` - Clear the cache
//! - `PUT /capacity` - Resize the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
