//! Quote extraction and pitch-form suggestions.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::pitches::non_blank;
use crate::error::{method_not_allowed, ApiError};
use crate::state::AppState;
use catalyst_enrich::templates;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/extract-quote",
            post(extract_quote).fallback(method_not_allowed),
        )
        .route(
            "/analyze-content",
            post(analyze_content).fallback(method_not_allowed),
        )
}

#[derive(Debug, Deserialize)]
struct ExtractQuoteRequest {
    transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeContentRequest {
    content: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    image_analysis: Option<String>,
    transcript: Option<String>,
}

async fn extract_quote(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractQuoteRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload?;
    let Some(transcript) = non_blank(req.transcript) else {
        return Err(ApiError::BadRequest("Transcript is required".into()));
    };

    let quote = state.enricher.extract_quote(&transcript).await;

    Ok(Json(serde_json::json!({
        "success": true,
        "quote": quote,
    })))
}

/// `{type: "pitch", content}` asks the generator for title, summary and tags.
/// Bodies carrying `imageAnalysis` or `transcript` instead get the keyword
/// template matcher.
async fn analyze_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeContentRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload?;

    if req.kind.as_deref() == Some("pitch") {
        if let Some(content) = non_blank(req.content) {
            let suggestions = state.enricher.enrich_pitch(&content).await;
            return Ok(Json(serde_json::json!({
                "success": true,
                "suggestions": suggestions,
            })));
        }
    }

    let legacy = non_blank(req.transcript)
        .map(|t| (t, "transcript"))
        .or_else(|| non_blank(req.image_analysis).map(|t| (t, "imageAnalysis")));

    let Some((text, source)) = legacy else {
        return Err(ApiError::BadRequest(
            r#"Invalid request. Please provide content with type "pitch"."#.into(),
        ));
    };

    let analysis = templates::analyze(&text, source);
    let matched = templates::match_templates(&analysis);

    Ok(Json(serde_json::json!({
        "success": true,
        "analysis": analysis,
        "templates": matched,
    })))
}
