//! Pitch submission and the published feed.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::error::{method_not_allowed, ApiError};
use crate::feed::{self, FeedEntry};
use crate::state::AppState;
use catalyst_core::tags;
use catalyst_store::{NewPitch, PitchStatus};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/submit-pitch",
            post(submit_pitch).fallback(method_not_allowed),
        )
        .route("/pitches", get(list_pitches).fallback(method_not_allowed))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitPitchRequest {
    title: Option<String>,
    description: Option<String>,
    transcript: Option<String>,
    audio_url: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FeedQuery {
    /// Comma-separated tags; a pitch matches if it carries any of them.
    tags: Option<String>,
}

/// POST /api/submit-pitch: validate, derive a quote, store as published.
async fn submit_pitch(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitPitchRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload?;

    let (Some(title), Some(transcript)) = (non_blank(req.title), non_blank(req.transcript))
    else {
        return Err(ApiError::BadRequest("Title and transcript are required".into()));
    };

    // Never fails: a generator error degrades to the transcript fallback.
    let quote = state.enricher.extract_quote(&transcript).await;

    let new = NewPitch {
        description: non_blank(req.description),
        quote: Some(quote),
        audio_url: non_blank(req.audio_url),
        tags: tags::validate(&req.tags.unwrap_or_default()),
        status: PitchStatus::Published,
        ..NewPitch::new(title, transcript)
    };

    let pitch = state
        .store
        .insert_pitch(&new)
        .map_err(|e| ApiError::internal("Failed to submit pitch", e))?;

    info!("Published pitch {} ({})", pitch.id, pitch.uuid);

    Ok(Json(serde_json::json!({
        "success": true,
        "pitch": {
            "id": pitch.id,
            "uuid": pitch.uuid,
            "title": pitch.title,
            "status": pitch.status,
        },
    })))
}

/// GET /api/pitches: published pitches, oldest first, projected for display.
async fn list_pitches(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(query) = query?;
    let pitches = state
        .store
        .list_pitches_by_status(PitchStatus::Published)
        .map_err(|e| ApiError::internal("Failed to fetch pitches", e))?;

    let wanted: Vec<String> = query
        .tags
        .as_deref()
        .map(|raw| tags::validate(&raw.split(',').collect::<Vec<_>>()))
        .unwrap_or_default();

    let now = chrono::Utc::now().timestamp_millis();
    let entries: Vec<FeedEntry> = pitches
        .iter()
        .map(|p| feed::project(p, now))
        .filter(|e| e.has_any_tag(&wanted))
        .collect();

    Ok(Json(serde_json::json!({
        "success": true,
        "pitches": entries,
    })))
}

/// Trimmed value, or None when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
