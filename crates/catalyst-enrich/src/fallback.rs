//! Transcript-derived substitutes used whenever text generation fails.

use catalyst_core::text::{char_len, ellipsize, first_sentence};

use crate::types::PitchSuggestions;

pub const FALLBACK_TITLE: &str = "Innovative Business Idea";
pub const FALLBACK_TAGS: &[&str] = &["🤖 AI/ML", "💸 Needs Funding", "Innovation"];

/// Suggestions built from the transcript alone.
pub fn suggestions(transcript: &str) -> PitchSuggestions {
    PitchSuggestions {
        title: title(transcript),
        summary: ellipsize(transcript, 200),
        tags: FALLBACK_TAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// The first sentence when it is 11..=59 chars long, else a generic title.
pub fn title(transcript: &str) -> String {
    let first = first_sentence(transcript);
    let len = char_len(first);
    if len > 10 && len < 60 {
        first.to_string()
    } else {
        FALLBACK_TITLE.to_string()
    }
}

/// The first sentence when it is 21..=149 chars long, else the transcript
/// cut to 100 chars (97 plus `...` when cut).
pub fn quote(transcript: &str) -> String {
    let first = first_sentence(transcript);
    let len = char_len(first);
    if len > 20 && len < 150 {
        first.to_string()
    } else {
        ellipsize(transcript, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_uses_first_sentence_in_range() {
        assert_eq!(title("Solar roofs for renters. More text."), "Solar roofs for renters");
        assert_eq!(title("Too short. Then more."), FALLBACK_TITLE);
        let long = format!("{}. tail", "w".repeat(60));
        assert_eq!(title(&long), FALLBACK_TITLE);
    }

    #[test]
    fn test_title_bounds_are_exclusive() {
        let ten = "a".repeat(10);
        let eleven = "a".repeat(11);
        let fifty_nine = "a".repeat(59);
        assert_eq!(title(&ten), FALLBACK_TITLE);
        assert_eq!(title(&eleven), eleven);
        assert_eq!(title(&fifty_nine), fifty_nine);
    }

    #[test]
    fn test_suggestions_summary_truncation() {
        let short = "A short pitch about kelp.";
        assert_eq!(suggestions(short).summary, short);

        let long = "b".repeat(300);
        let s = suggestions(&long);
        assert_eq!(char_len(&s.summary), 200);
        assert!(s.summary.starts_with(&"b".repeat(197)));
        assert!(s.summary.ends_with("..."));
        assert_eq!(s.tags, vec!["🤖 AI/ML", "💸 Needs Funding", "Innovation"]);
    }

    #[test]
    fn test_quote_prefers_first_sentence() {
        let t = "Every coastline deserves a robot that eats plastic! We build them.";
        assert_eq!(quote(t), "Every coastline deserves a robot that eats plastic");
    }

    #[test]
    fn test_quote_without_terminators_is_cut_to_100() {
        let t = "z".repeat(180);
        let q = quote(&t);
        assert_eq!(char_len(&q), 100);
        assert_eq!(q, format!("{}...", "z".repeat(97)));
    }

    #[test]
    fn test_quote_short_transcript_kept_whole() {
        assert_eq!(quote("Tiny idea"), "Tiny idea");
    }
}
