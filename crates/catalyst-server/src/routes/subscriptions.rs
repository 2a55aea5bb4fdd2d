//! Mailing-list signup.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use super::pitches::non_blank;
use crate::error::{method_not_allowed, ApiError};
use crate::state::AppState;
use catalyst_core::Error;

const DEFAULT_SOURCE: &str = "website";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/subscribe", post(subscribe).fallback(method_not_allowed))
}

#[derive(Debug, Deserialize)]
struct SubscribeRequest {
    email: Option<String>,
    source: Option<String>,
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = payload?;

    let email = non_blank(req.email)
        .map(|e| e.to_lowercase())
        .filter(|e| e.contains('@'));
    let Some(email) = email else {
        return Err(ApiError::BadRequest("A valid email is required".into()));
    };
    let source = non_blank(req.source).unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    match state.store.add_subscription(&email, &source) {
        Ok(sub) => {
            info!("New subscription {} from {}", sub.uuid, sub.source);
            Ok(Json(serde_json::json!({
                "success": true,
                "alreadySubscribed": false,
                "subscription": {
                    "uuid": sub.uuid,
                    "email": sub.email,
                    "source": sub.source,
                    "status": sub.status,
                },
            })))
        }
        Err(Error::Duplicate(_)) => Ok(Json(serde_json::json!({
            "success": true,
            "alreadySubscribed": true,
        }))),
        Err(e) => Err(ApiError::internal("Failed to subscribe", e)),
    }
}
