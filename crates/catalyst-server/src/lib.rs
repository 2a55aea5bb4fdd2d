//! Catalyst HTTP server: pitch submission, feed, tags, enrichment endpoints.

pub mod backfill;
pub mod error;
pub mod feed;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
