//! Text generation through external LLM APIs (OpenAI/Anthropic/Groq).
//!
//! Callers depend on the [`TextGenerator`] trait; [`create_generator`] picks
//! a live client when an API key is configured and a no-op otherwise.

pub mod config;
pub mod generator;
pub mod providers;
pub mod types;

pub use config::{LLMConfig, ProviderChoice};
pub use generator::{create_generator, LlmClient, NoopGenerator, TextGenerator};
pub use types::*;
