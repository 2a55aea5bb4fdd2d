//! Tag vocabulary route.

use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::{method_not_allowed, ApiError};
use crate::state::AppState;
use catalyst_core::tags::{self, STANDARD_TAGS};
use catalyst_store::PitchStatus;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tags", get(get_tags).fallback(method_not_allowed))
}

/// GET /api/tags: standard tags, tags in use, and the merged sorted list.
async fn get_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pitches = state
        .store
        .list_pitches_by_status(PitchStatus::Published)
        .map_err(|e| ApiError::internal("Failed to fetch tags", e))?;

    let mut seen = HashSet::new();
    let existing: Vec<&str> = pitches
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .filter(|t| seen.insert(*t))
        .collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "tags": {
            "standard": STANDARD_TAGS,
            "all": tags::merge_and_sort(&existing),
            "existing": existing,
        },
    })))
}
