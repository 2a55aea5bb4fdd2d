//! External LLM provider calls.
//!
//! One non-streaming request per call. OpenAI and Groq share the chat
//! completions format; Anthropic uses the Messages API.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::types::{ChatMessage, GenerationOptions, LLMProvider};
use catalyst_core::{Error, Result};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// Send `messages` to `provider` and return the generated text.
pub async fn complete(
    client: &Client,
    provider: LLMProvider,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    options: &GenerationOptions,
) -> Result<String> {
    match provider {
        LLMProvider::OpenAI => {
            complete_openai_compat(client, OPENAI_URL, messages, model, api_key, options).await
        }
        LLMProvider::Groq => {
            complete_openai_compat(client, GROQ_URL, messages, model, api_key, options).await
        }
        LLMProvider::Anthropic => {
            complete_anthropic(client, messages, model, api_key, options).await
        }
    }
}

async fn complete_openai_compat(
    client: &Client,
    url: &str,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    options: &GenerationOptions,
) -> Result<String> {
    let msgs: Vec<Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let body = json!({
        "model": model,
        "messages": msgs,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    });

    debug!("Requesting completion from {} with model {}", url, model);

    let response = client
        .post(url)
        .header("Authorization", format!("Bearer {}", api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let parsed = read_json(response).await?;
    parse_openai_response(&parsed)
}

async fn complete_anthropic(
    client: &Client,
    messages: &[ChatMessage],
    model: &str,
    api_key: &str,
    options: &GenerationOptions,
) -> Result<String> {
    // Anthropic takes the system prompt as a top-level field
    let system_msg: Option<&str> = messages
        .iter()
        .find(|m| m.role == "system")
        .map(|m| m.content.as_str());

    let conv_msgs: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv_msgs,
        "temperature": options.temperature,
        "max_tokens": options.max_tokens,
    });

    if let Some(sys) = system_msg {
        body["system"] = json!(sys);
    }

    debug!("Requesting completion from Anthropic with model {}", model);

    let response = client
        .post(ANTHROPIC_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let parsed = read_json(response).await?;
    parse_anthropic_response(&parsed)
}

async fn read_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("LLM API error {}: {}", status, body);
        return Err(Error::Http(format!("API error {}", status)));
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| Error::Http(format!("Invalid response body: {}", e)))
}

/// Extract the assistant text from an OpenAI-style completion body.
pub fn parse_openai_response(body: &Value) -> Result<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Inference("No content in completion response".into()))
}

/// Extract the concatenated text blocks from an Anthropic Messages body.
pub fn parse_anthropic_response(body: &Value) -> Result<String> {
    let blocks = body["content"]
        .as_array()
        .ok_or_else(|| Error::Inference("No content in message response".into()))?;

    let text: String = blocks
        .iter()
        .filter(|b| b["type"] == "text")
        .filter_map(|b| b["text"].as_str())
        .collect();

    if text.is_empty() {
        Err(Error::Inference("Message response had no text blocks".into()))
    } else {
        Ok(text)
    }
}
