//! HTTP API Handlers and Routes
//!
//! A thin REST layer over the research pipeline, built on Axum.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `GET /api/health` - Health check
//! - `POST /api/research` - Run a research query: `{"query": "..."}`
//! - `POST /api/memory/search` - Search past sessions: `{"query": "...", "top_k": 3, "threshold": 0.35}`
//! - `GET /api/memory/stats` - Memory file location and size
//!
//! Errors are returned as `{"error": "..."}` with a 4xx/5xx status.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
