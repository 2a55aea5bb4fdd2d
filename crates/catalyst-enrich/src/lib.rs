//! Pitch enrichment: title, summary, tags, and quote from a transcript.
//!
//! Every operation calls the configured text generator once and falls back
//! to a pure, transcript-derived result on any failure, so callers always
//! get usable content.

pub mod fallback;
pub mod pipeline;
pub mod prompts;
pub mod templates;
pub mod types;

pub use pipeline::Enricher;
pub use types::*;
