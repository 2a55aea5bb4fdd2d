//! Data types for pitches and subscriptions.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchStatus {
    Draft,
    Published,
    Archived,
}

impl PitchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }

    /// Parse a stored status value. Unknown values are treated as drafts.
    pub fn from_db(value: &str) -> Self {
        match value {
            "published" => Self::Published,
            "archived" => Self::Archived,
            _ => Self::Draft,
        }
    }
}

impl std::fmt::Display for PitchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pitch row from the database, with `tags` already decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pitch {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub tags: Vec<String>,
    pub status: PitchStatus,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Unix milliseconds.
    pub updated_at: i64,
}

/// Values for inserting a pitch. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPitch {
    pub title: String,
    pub description: Option<String>,
    pub transcript: String,
    pub quote: Option<String>,
    pub audio_url: Option<String>,
    /// Stored as NULL when empty.
    pub tags: Vec<String>,
    pub status: PitchStatus,
    /// Override for the creation time (Unix ms); defaults to now.
    pub created_at: Option<i64>,
}

impl NewPitch {
    pub fn new(title: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            transcript: transcript.into(),
            quote: None,
            audio_url: None,
            tags: Vec::new(),
            status: PitchStatus::Draft,
            created_at: None,
        }
    }
}

/// An email subscription row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub uuid: String,
    pub email: String,
    pub source: String,
    pub status: String,
    pub created_at: i64,
}
