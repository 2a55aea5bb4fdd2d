//! Prompt construction for the text generator.

use catalyst_chat::{ChatMessage, GenerationOptions};
use catalyst_core::tags::STANDARD_TAGS;

/// What each standard tag is meant for, in vocabulary order.
const TAG_HINTS: &[&str] = &[
    "environmental or sustainability tech",
    "games and entertainment",
    "creative and artistic projects",
    "artificial intelligence and machine learning",
    "learning and education",
    "marine and ocean projects",
    "the pitch asks for money",
    "the pitch asks for developers",
    "the pitch asks for designers",
];

pub const PITCH_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 1024,
};

pub const QUOTE_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 200,
};

/// Messages asking for `{title, summary, tags}` as JSON.
pub fn pitch_messages(transcript: &str) -> Vec<ChatMessage> {
    let tag_list: String = STANDARD_TAGS
        .iter()
        .zip(TAG_HINTS)
        .map(|(tag, hint)| format!("  * {} ({})\n", tag, hint))
        .collect();

    let prompt = format!(
        "Read the pitch transcript below and write marketing copy for it.\n\
         \n\
         Produce:\n\
         1. A clear, engaging title of at most 60 characters\n\
         2. A summary of 100-200 words covering the problem, the solution, and why it matters \
         to collaborators and investors\n\
         3. Between 3 and 5 tags\n\
         \n\
         Transcript:\n\"{}\"\n\
         \n\
         Prefer these standard tags where they fit:\n{}\
         Other tags are allowed when none of these apply.\n\
         \n\
         Reply with JSON only, shaped like:\n\
         {{\"title\": \"...\", \"summary\": \"...\", \"tags\": [\"...\", \"...\", \"...\"]}}",
        transcript, tag_list
    );

    vec![
        ChatMessage::system(
            "You write concise, compelling pitch titles and summaries. Always respond with valid JSON.",
        ),
        ChatMessage::user(prompt),
    ]
}

/// Messages asking for one quotable line.
pub fn quote_messages(transcript: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Pick the single most memorable line from this pitch transcript: one that captures \
         the core idea and makes people want to hear more. It should be 50-150 characters. \
         If no line in the transcript works, write one that captures the idea.\n\
         \n\
         Transcript:\n\"{}\"\n\
         \n\
         Reply with the quote only, no other text or formatting.",
        transcript
    );

    vec![
        ChatMessage::system(
            "You find the most quotable moments in business pitches. Reply with the quote only.",
        ),
        ChatMessage::user(prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_prompt_lists_every_standard_tag() {
        assert_eq!(TAG_HINTS.len(), STANDARD_TAGS.len());
        let messages = pitch_messages("We grow kelp.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        let user = &messages[1].content;
        assert!(user.contains("\"We grow kelp.\""));
        for tag in STANDARD_TAGS {
            assert!(user.contains(tag), "missing {}", tag);
        }
    }

    #[test]
    fn test_quote_prompt_embeds_transcript() {
        let messages = quote_messages("Plastic-eating robots.");
        assert!(messages[1].content.contains("Plastic-eating robots."));
        assert_eq!(QUOTE_OPTIONS.max_tokens, 200);
    }
}
