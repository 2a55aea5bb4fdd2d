//! Enrichment pipeline: one generator call, parse, clamp, or fall back.

use std::sync::Arc;

use catalyst_chat::TextGenerator;
use catalyst_core::tags;
use catalyst_core::text::{ellipsize, take_chars};
use catalyst_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::fallback;
use crate::prompts;
use crate::types::{limits, PitchSuggestions};

const UNTITLED: &str = "Untitled Pitch";
const DEFAULT_TAGS: &[&str] = &["Innovation", "Startup"];

/// Markdown code fence around a model reply, e.g. ```json ... ```.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$").unwrap());

/// Runs enrichment against a shared text generator.
#[derive(Clone)]
pub struct Enricher {
    generator: Arc<dyn TextGenerator>,
}

impl Enricher {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// False when every call will take the fallback path.
    pub fn generator_available(&self) -> bool {
        self.generator.is_available()
    }

    /// Suggest a title, summary, and tags for `transcript`. Never fails.
    pub async fn enrich_pitch(&self, transcript: &str) -> PitchSuggestions {
        match self.try_enrich_pitch(transcript).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("Pitch enrichment fell back to transcript heuristics: {}", e);
                fallback::suggestions(transcript)
            }
        }
    }

    /// Pick a short quotable excerpt from `transcript`. Never fails.
    pub async fn extract_quote(&self, transcript: &str) -> String {
        match self.try_extract_quote(transcript).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Quote extraction fell back to transcript heuristics: {}", e);
                fallback::quote(transcript)
            }
        }
    }

    async fn try_enrich_pitch(&self, transcript: &str) -> Result<PitchSuggestions> {
        let raw = self
            .generator
            .generate(prompts::pitch_messages(transcript), prompts::PITCH_OPTIONS)
            .await?;
        let parsed = parse_json_reply(&raw)?;
        Ok(clamp_suggestions(&parsed, transcript))
    }

    async fn try_extract_quote(&self, transcript: &str) -> Result<String> {
        let raw = self
            .generator
            .generate(prompts::quote_messages(transcript), prompts::QUOTE_OPTIONS)
            .await?;
        clean_quote(&raw).ok_or_else(|| Error::Inference("Empty quote".into()))
    }
}

/// Parse a model reply as JSON, unwrapping a surrounding code fence.
fn parse_json_reply(raw: &str) -> Result<Value> {
    let body = match CODE_FENCE.captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => raw.trim(),
    };
    if body.is_empty() {
        return Err(Error::Inference("Empty completion".into()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Apply the length limits to whatever shape the model returned.
fn clamp_suggestions(parsed: &Value, transcript: &str) -> PitchSuggestions {
    let title = match parsed["title"].as_str() {
        Some(t) if !t.is_empty() => take_chars(t, limits::TITLE_MAX).to_string(),
        _ => UNTITLED.to_string(),
    };

    let summary = match parsed["summary"].as_str() {
        Some(s) if !s.is_empty() => take_chars(s, limits::SUMMARY_MAX).to_string(),
        _ => take_chars(transcript, 200).to_string(),
    };

    let tags = match parsed["tags"].as_array() {
        Some(list) => {
            let strings: Vec<&str> = list.iter().filter_map(Value::as_str).collect();
            let mut cleaned = tags::validate(&strings);
            cleaned.truncate(limits::TAGS_MAX);
            cleaned
        }
        None => DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
    };

    PitchSuggestions {
        title,
        summary,
        tags,
    }
}

/// Trim, drop one wrapping quote mark on each side, and cap the length.
fn clean_quote(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(['"', '\''])
        .unwrap_or(trimmed)
        .trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(ellipsize(trimmed, limits::QUOTE_MAX))
    }
}
