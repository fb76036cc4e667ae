//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`listings`] - search/detail proxy with pricing enrichment
//! - [`filters`] - distinct-value passthrough for filter population
//! - [`references`] - brand/model reference cache

pub mod filters;
pub mod health;
pub mod listings;
pub mod references;

use axum::Router;

use crate::core::AppState;

/// The full route tree
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(listings::router())
        .merge(filters::router())
        .merge(references::router())
}
