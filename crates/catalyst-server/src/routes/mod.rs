//! HTTP route handlers: the `/api/*` JSON surface used by the web client.

pub mod analysis;
pub mod backfill;
pub mod pitches;
pub mod subscriptions;
pub mod tags;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(pitches::routes())
        .merge(tags::routes())
        .merge(analysis::routes())
        .merge(backfill::routes())
        .merge(subscriptions::routes())
}
