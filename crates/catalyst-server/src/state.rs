//! Shared application state.

use std::sync::Arc;

use catalyst_chat::TextGenerator;
use catalyst_core::CatalystConfig;
use catalyst_enrich::Enricher;
use catalyst_store::SqliteStore;

/// Shared application state accessible from all route handlers.
///
/// Holds no per-request data: handlers re-read the store on every call.
pub struct AppState {
    pub config: CatalystConfig,
    pub store: SqliteStore,
    pub enricher: Enricher,
}

impl AppState {
    pub fn new(
        config: CatalystConfig,
        store: SqliteStore,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            config,
            store,
            enricher: Enricher::new(generator),
        }
    }
}
