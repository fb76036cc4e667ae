//! Filter Values Passthrough
//!
//! Thin proxy for the upstream distinct-value endpoint the UI uses to
//! populate search filters. No enrichment; the body is validated and
//! forwarded as-is.

use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::core::AppState;
use crate::utils::AppResult;
use shared::models::search::FiltersRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/getAvailableFilters", post(available_filters))
}

/// POST /api/getAvailableFilters
async fn available_filters(
    State(state): State<AppState>,
    Json(request): Json<FiltersRequest>,
) -> AppResult<Json<serde_json::Value>> {
    request.validate()?;
    let response = state.upstream.available_filters(&request).await?;
    Ok(Json(response))
}
