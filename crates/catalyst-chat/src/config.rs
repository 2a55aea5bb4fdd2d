//! LLM configuration loading and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::LLMProvider;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Provider preference when `preferred_provider` is `auto`.
pub const AUTO_ORDER: &[LLMProvider] = &[LLMProvider::Anthropic, LLMProvider::Groq, LLMProvider::OpenAI];

/// A resolved provider with the model and key to call it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderChoice {
    pub provider: LLMProvider,
    pub model: String,
    pub api_key: String,
}

/// Stored LLM configuration (`llm-config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
        }
    }
}

impl LLMConfig {
    /// Load `llm-config.json`, taking API keys missing from it from the environment.
    pub fn load(config_path: &Path) -> Self {
        let mut config = Self::from_file(config_path);

        for (slot, var) in [
            (&mut config.openai_api_key, "OPENAI_API_KEY"),
            (&mut config.anthropic_api_key, "ANTHROPIC_API_KEY"),
            (&mut config.groq_api_key, "GROQ_API_KEY"),
        ] {
            if slot.is_none() {
                *slot = std::env::var(var).ok();
            }
        }

        config
    }

    /// Read the config file alone, without consulting the environment.
    pub fn from_file(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                LLMConfig::default()
            }),
            Err(_) => LLMConfig::default(),
        }
    }

    /// Model and key for `provider`, if a key is set.
    fn credentials(&self, provider: LLMProvider) -> Option<ProviderChoice> {
        let (key, model) = match provider {
            LLMProvider::OpenAI => (&self.openai_api_key, &self.openai_model),
            LLMProvider::Anthropic => (&self.anthropic_api_key, &self.anthropic_model),
            LLMProvider::Groq => (&self.groq_api_key, &self.groq_model),
        };
        let api_key = key.as_deref().filter(|k| !k.is_empty())?;
        Some(ProviderChoice {
            provider,
            model: model.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// Pick the provider to call. `auto` takes the first keyed provider in
    /// [`AUTO_ORDER`]; a named provider without a key yields nothing.
    pub fn resolve_provider(&self) -> Option<ProviderChoice> {
        if self.preferred_provider == "auto" {
            return AUTO_ORDER.iter().find_map(|p| self.credentials(*p));
        }
        LLMProvider::from_name(&self.preferred_provider).and_then(|p| self.credentials(p))
    }
}
