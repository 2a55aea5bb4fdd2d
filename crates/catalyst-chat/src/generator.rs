//! The text generation seam used by enrichment.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::config::LLMConfig;
use crate::providers;
use crate::types::{ChatMessage, GenerationOptions, LLMProvider};
use catalyst_core::{Error, Result};

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion. No retries; any failure is returned as-is.
    async fn generate(&self, messages: Vec<ChatMessage>, options: GenerationOptions)
        -> Result<String>;

    /// Whether a backing service is configured at all.
    fn is_available(&self) -> bool;
}

/// Generator backed by an external provider API.
pub struct LlmClient {
    client: Client,
    provider: LLMProvider,
    model: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(provider: LLMProvider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            provider,
            model: model.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        options: GenerationOptions,
    ) -> Result<String> {
        providers::complete(
            &self.client,
            self.provider,
            &messages,
            &self.model,
            &self.api_key,
            &options,
        )
        .await
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Generator used when no provider is configured; every call fails.
#[derive(Debug, Default)]
pub struct NoopGenerator;

#[async_trait]
impl TextGenerator for NoopGenerator {
    async fn generate(
        &self,
        _messages: Vec<ChatMessage>,
        _options: GenerationOptions,
    ) -> Result<String> {
        Err(Error::Config("No LLM provider configured".into()))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Create the best available generator for `config`.
pub fn create_generator(config: &LLMConfig) -> Arc<dyn TextGenerator> {
    match config.resolve_provider() {
        Some(choice) => {
            info!(
                "Using {} text generation (model={})",
                choice.provider, choice.model
            );
            Arc::new(LlmClient::new(choice.provider, choice.model, choice.api_key))
        }
        None => {
            info!("No LLM provider configured. Enrichment will use fallbacks only.");
            Arc::new(NoopGenerator)
        }
    }
}
