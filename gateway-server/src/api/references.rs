//! Reference Cache Route
//!
//! Serves the brand/model reference lists assembled by the background
//! refresh job. Always answers - a cold cache is an empty cache, and the
//! UI falls back to free-text filters until the first refresh lands.

use axum::{Json, Router, extract::State, routing::get};

use crate::core::AppState;
use crate::references::ReferenceCache;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/references", get(references))
}

async fn references(State(state): State<AppState>) -> Json<ReferenceCache> {
    let snapshot = state.references.snapshot().await;
    Json((*snapshot).clone())
}
