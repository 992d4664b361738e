//! API Module
//!
//! HTTP handlers and routing for the tag cache REST API.
//!
//! # Endpoints
//! - `PUT /entries` - Store a value under a tag set
//! - `DELETE /entries` - Delete the entry for a tag set
//! - `POST /entries/lookup` - Retrieve a value by tag set
//! - `POST /entries/check` - Check for a live entry
//! - `POST /invalidate` - Invalidate tags
//! - `POST /clear` - Drop all entries
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
