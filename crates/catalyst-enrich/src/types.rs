//! Enrichment result types.

use serde::{Deserialize, Serialize};

/// AI (or fallback) suggestions for a pitch form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchSuggestions {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
}

/// Length limits applied to every suggestion regardless of its source.
pub mod limits {
    pub const TITLE_MAX: usize = 60;
    pub const SUMMARY_MAX: usize = 500;
    pub const TAGS_MAX: usize = 5;
    pub const QUOTE_MAX: usize = 150;
}
