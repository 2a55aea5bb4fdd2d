//! Legacy content analysis: match free text against fixed pitch templates.
//!
//! Pure keyword work, no text generator involved.

use catalyst_core::tags;
use serde::Serialize;

/// A canned pitch outline offered to users whose content fits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const PITCH_TEMPLATES: &[PitchTemplate] = &[
    PitchTemplate {
        id: "climate-venture",
        name: "Climate Venture",
        description: "A product or service that cuts emissions or waste.",
        tags: &["🌱 CleanTech", "🌊 Ocean", "💸 Needs Funding"],
    },
    PitchTemplate {
        id: "ai-product",
        name: "AI Product",
        description: "Software that learns from data to automate a task.",
        tags: &["🤖 AI/ML", "🔥 Needs Dev"],
    },
    PitchTemplate {
        id: "creative-project",
        name: "Creative Project",
        description: "Art, media, or a game looking for collaborators.",
        tags: &["🎨 Art", "🎮 Gaming", "🎨 Needs Design"],
    },
    PitchTemplate {
        id: "learning-platform",
        name: "Learning Platform",
        description: "A new way to teach or learn something.",
        tags: &["📚 Education", "🔥 Needs Dev"],
    },
    PitchTemplate {
        id: "team-builder",
        name: "Team Builder",
        description: "An early idea that needs people before money.",
        tags: &["🔥 Needs Dev", "🎨 Needs Design"],
    },
    PitchTemplate {
        id: "fundraiser",
        name: "Fundraiser",
        description: "A working prototype ready for investment.",
        tags: &["💸 Needs Funding"],
    },
];

/// How many templates a match returns.
pub const MAX_TEMPLATE_MATCHES: usize = 3;

/// Summary of a piece of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    /// Which request field the text came from (`transcript` or `imageAnalysis`).
    pub source: String,
    pub word_count: usize,
    pub suggested_tags: Vec<String>,
}

/// Analyze `text` taken from the request field named `source`.
pub fn analyze(text: &str, source: &str) -> ContentAnalysis {
    ContentAnalysis {
        source: source.to_string(),
        word_count: text.split_whitespace().count(),
        suggested_tags: tags::suggest(text),
    }
}

/// Templates sharing the most tags with the analysis, best first. Ties keep
/// table order. With no overlap at all the first templates are returned.
pub fn match_templates(analysis: &ContentAnalysis) -> Vec<&'static PitchTemplate> {
    let mut scored: Vec<(usize, &'static PitchTemplate)> = PITCH_TEMPLATES
        .iter()
        .map(|t| {
            let overlap = t
                .tags
                .iter()
                .filter(|tag| analysis.suggested_tags.iter().any(|s| s == *tag))
                .count();
            (overlap, t)
        })
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    if scored.is_empty() {
        return PITCH_TEMPLATES.iter().take(MAX_TEMPLATE_MATCHES).collect();
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_TEMPLATE_MATCHES)
        .map(|(_, t)| t)
        .collect()
}
