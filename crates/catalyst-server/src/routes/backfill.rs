//! Quote backfill trigger for pitches stored without a quote.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::backfill::backfill_quotes;
use crate::error::{method_not_allowed, ApiError};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/update-existing-quotes",
        post(update_existing_quotes).fallback(method_not_allowed),
    )
}

/// POST /api/update-existing-quotes: fill in quotes for older pitches.
async fn update_existing_quotes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let report = backfill_quotes(&state.store, &state.enricher)
        .await
        .map_err(|e| ApiError::internal("Failed to update existing quotes", e))?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": report.message(),
        "updated": report.updated,
    })))
}
