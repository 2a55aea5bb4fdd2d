//! Tag vocabulary, tag-list cleanup, and keyword-based tag suggestion.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Standard tags, always offered to users and preferred when sorting.
pub const STANDARD_TAGS: &[&str] = &[
    "🌱 CleanTech",
    "🎮 Gaming",
    "🎨 Art",
    "🤖 AI/ML",
    "📚 Education",
    "🌊 Ocean",
    "💸 Needs Funding",
    "🔥 Needs Dev",
    "🎨 Needs Design",
];

/// Keyword group → standard tag, checked in order by [`suggest`].
///
/// Matching is plain substring containment on lower-cased text, so short
/// keywords like `ai` or `sea` also fire inside longer words.
const KEYWORD_GROUPS: &[(&[&str], &str)] = &[
    (&["clean", "sustain", "green", "environment"], "🌱 CleanTech"),
    (&["game", "play", "entertainment"], "🎮 Gaming"),
    (&["art", "creative", "design", "visual"], "🎨 Art"),
    (
        &["ai", "machine learning", "artificial intelligence", "algorithm"],
        "🤖 AI/ML",
    ),
    (&["learn", "education", "school", "teach"], "📚 Education"),
    (&["ocean", "marine", "sea", "water"], "🌊 Ocean"),
    (&["fund", "money", "investment", "capital"], "💸 Needs Funding"),
    (&["developer", "programmer", "engineer", "code"], "🔥 Needs Dev"),
    (&["designer", "ui", "ux", "visual"], "🎨 Needs Design"),
];

/// Whether `tag` is exactly one of [`STANDARD_TAGS`].
pub fn is_standard(tag: &str) -> bool {
    STANDARD_TAGS.contains(&tag)
}

/// Union the standard vocabulary with `existing`, drop exact duplicates,
/// and order standard tags before custom ones (each group alphabetical).
pub fn merge_and_sort<S: AsRef<str>>(existing: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged: Vec<String> = STANDARD_TAGS
        .iter()
        .copied()
        .chain(existing.iter().map(|t| t.as_ref()))
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect();

    merged.sort_by(|a, b| match (is_standard(a), is_standard(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => locale_cmp(a, b),
    });
    merged
}

/// Trim every tag, drop empties, and remove duplicates keeping the first
/// occurrence. Order is otherwise preserved.
pub fn validate<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

/// Suggest standard tags for free text, in vocabulary-table order.
pub fn suggest(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, tag)| tag.to_string())
        .collect()
}

/// Case-insensitive ordering with lower case first on ties, close to what a
/// browser's `localeCompare` gives for tag labels.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
