//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Liveness check.
pub mod health;
/// Memory search and stats handlers.
pub mod memory;
/// Research run handler.
pub mod research;
