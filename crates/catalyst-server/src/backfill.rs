//! Quote backfill for pitches stored before quotes existed.

use catalyst_core::Result;
use catalyst_enrich::Enricher;
use catalyst_store::SqliteStore;
use tracing::{info, warn};

/// Outcome of one backfill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Pitches found without a quote.
    pub candidates: usize,
    pub updated: usize,
    pub failed: usize,
}

impl BackfillReport {
    pub fn message(&self) -> String {
        if self.candidates == 0 {
            "All pitches already have quotes".to_string()
        } else {
            format!("Updated {} pitches with quotes", self.updated)
        }
    }
}

/// Extract and store a quote for every pitch whose quote is NULL.
///
/// A row that fails to update is logged and skipped; only the initial
/// query can fail the whole pass.
pub async fn backfill_quotes(store: &SqliteStore, enricher: &Enricher) -> Result<BackfillReport> {
    let pending = store.pitches_without_quote()?;
    let mut report = BackfillReport {
        candidates: pending.len(),
        ..Default::default()
    };

    if pending.is_empty() {
        return Ok(report);
    }

    info!("Backfilling quotes for {} pitches", pending.len());

    for pitch in &pending {
        let quote = enricher.extract_quote(&pitch.transcript).await;
        match store.update_quote(pitch.id, &quote) {
            Ok(true) => report.updated += 1,
            Ok(false) => {
                warn!("Pitch {} disappeared before its quote was stored", pitch.id);
                report.failed += 1;
            }
            Err(e) => {
                warn!("Failed to store quote for pitch {}: {}", pitch.id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Quote backfill complete: updated={}, failed={}",
        report.updated, report.failed
    );

    Ok(report)
}
