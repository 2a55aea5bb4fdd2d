//! Feed projection: display fields derived from a stored pitch at read time.
//!
//! Nothing here is persisted; every read recomputes the projection against
//! the current clock.

use catalyst_core::text::{char_len, take_chars, ELLIPSIS};
use catalyst_store::Pitch;
use serde::Serialize;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// One card in the public feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: i64,
    pub creator: String,
    pub title: String,
    pub avatar: String,
    pub quote: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub timestamp: String,
    pub audio_url: Option<String>,
    pub transcript: String,
}

impl FeedEntry {
    /// Whether the entry carries at least one of `wanted`. Empty matches all.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.is_empty() || wanted.iter().any(|w| self.tags.contains(w))
    }
}

/// Project a stored pitch for display at time `now_ms` (Unix ms).
pub fn project(pitch: &Pitch, now_ms: i64) -> FeedEntry {
    let creator = creator_name(&pitch.title);
    let avatar = avatar_initials(&creator);

    let quote = match pitch.quote.as_deref() {
        Some(q) if !q.is_empty() => q.to_string(),
        _ if char_len(&pitch.transcript) > 100 => {
            format!("{}{}", take_chars(&pitch.transcript, 100), ELLIPSIS)
        }
        _ => pitch.transcript.clone(),
    };

    let summary = match pitch.description.as_deref() {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => format!("{}{}", take_chars(&pitch.transcript, 200), ELLIPSIS),
    };

    FeedEntry {
        id: pitch.id,
        creator,
        title: pitch.title.clone(),
        avatar,
        quote,
        summary,
        tags: pitch.tags.clone(),
        timestamp: relative_time(pitch.created_at, now_ms),
        audio_url: pitch.audio_url.clone(),
        transcript: pitch.transcript.clone(),
    }
}

/// Display name derived from the first two words of the title.
///
/// Pitches carry no author field, so this is a stand-in: it yields the
/// pitch's own opening words, and a one-word title leaves a trailing space.
pub fn creator_name(title: &str) -> String {
    let mut words = title.split(' ');
    let first = words.next().unwrap_or("");
    let second = words.next().unwrap_or("");
    format!("{} {}", first, second)
}

/// First character of each space-separated word.
pub fn avatar_initials(name: &str) -> String {
    name.split(' ').filter_map(|w| w.chars().next()).collect()
}

/// `Just now`, `N hour(s) ago`, or `N day(s) ago`.
pub fn relative_time(created_ms: i64, now_ms: i64) -> String {
    let hours = (now_ms - created_ms).div_euclid(MS_PER_HOUR);
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else {
        let days = hours / 24;
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    }
}
