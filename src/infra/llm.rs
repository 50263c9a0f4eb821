//! HTTP adapters for the LLM chat vendors.
//!
//! Groq speaks the OpenAI chat-completions format; Gemini uses its native
//! `contents` / `system_instruction` format with optional search grounding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::{
    CHAT_MAX_TOKENS, CHAT_TEMPERATURE, CHAT_TIMEOUT_SECONDS, GEMINI_TOP_P, GEMINI_URL, GROQ_MODEL,
    GROQ_URL,
};
use crate::domain::{HistoryItem, ProviderKind};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Reply used when the vendor answers without any text
pub const FALLBACK_REPLY: &str = "Je suis désolé, je n'ai pas pu générer une réponse.";

/// Everything a vendor needs to answer one turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub history: Vec<HistoryItem>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Vendor answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request never completed or the body was not JSON
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError>;
}

/// Shared HTTP client for outbound vendor calls
pub fn http_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(CHAT_TIMEOUT_SECONDS))
        .build()
        .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))
}

async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<Value>().await?)
}

// =============================================================================
// Groq
// =============================================================================

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<GroqMessage<'a>>,
}

/// Chat-completions payload: system prompt, history with `model` turns
/// renamed to `assistant`, then the new user message.
pub fn groq_payload(prompt: &ChatPrompt) -> Value {
    let mut messages = Vec::with_capacity(prompt.history.len() + 2);
    messages.push(GroqMessage {
        role: "system",
        content: &prompt.system,
    });
    for item in &prompt.history {
        messages.push(GroqMessage {
            role: if item.is_model() { "assistant" } else { "user" },
            content: &item.text,
        });
    }
    messages.push(GroqMessage {
        role: "user",
        content: &prompt.message,
    });

    serde_json::json!(GroqRequest {
        model: GROQ_MODEL,
        max_tokens: CHAT_MAX_TOKENS,
        temperature: CHAT_TEMPERATURE,
        messages,
    })
}

pub fn groq_reply(body: &Value) -> Option<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
}

pub struct GroqProvider {
    client: Client,
    api_key: String,
    url: String,
}

impl GroqProvider {
    pub fn new(client: Client, api_key: Option<&str>) -> Self {
        Self::with_url(client, api_key, GROQ_URL)
    }

    /// Point the adapter at another endpoint (a local stand-in in tests)
    pub fn with_url(client: Client, api_key: Option<&str>, url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.unwrap_or_default().to_string(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&groq_payload(prompt))
            .send()
            .await?;

        let body = read_json(response).await?;
        Ok(groq_reply(&body).unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

// =============================================================================
// Gemini
// =============================================================================

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    system_instruction: GeminiSystemInstruction<'a>,
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Value>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

/// Native Gemini payload. History roles pass through unchanged; the
/// `google_search` tool is attached only when `with_search` is set.
pub fn gemini_payload(prompt: &ChatPrompt, with_search: bool) -> Value {
    let mut contents: Vec<GeminiContent<'_>> = prompt
        .history
        .iter()
        .map(|item| GeminiContent {
            role: &item.role,
            parts: vec![GeminiPart { text: &item.text }],
        })
        .collect();
    contents.push(GeminiContent {
        role: "user",
        parts: vec![GeminiPart {
            text: &prompt.message,
        }],
    });

    serde_json::json!(GeminiRequest {
        system_instruction: GeminiSystemInstruction {
            parts: vec![GeminiPart {
                text: &prompt.system
            }],
        },
        contents,
        tools: with_search.then(|| serde_json::json!([{ "google_search": {} }])),
        generation_config: GeminiGenerationConfig {
            max_output_tokens: CHAT_MAX_TOKENS,
            temperature: CHAT_TEMPERATURE,
            top_p: GEMINI_TOP_P,
        },
    })
}

pub fn gemini_reply(body: &Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
}

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    url: String,
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: Option<&str>) -> Self {
        Self::with_url(client, api_key, GEMINI_URL)
    }

    /// Point the adapter at another endpoint (a local stand-in in tests)
    pub fn with_url(client: Client, api_key: Option<&str>, url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.unwrap_or_default().to_string(),
            url: url.into(),
        }
    }

    async fn generate(&self, prompt: &ChatPrompt, with_search: bool) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&gemini_payload(prompt, with_search))
            .send()
            .await?;

        let body = read_json(response).await?;
        Ok(gemini_reply(&body).unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    /// Search grounding has its own quota, so a 429 is retried once without it.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        match self.generate(prompt, true).await {
            Err(ProviderError::Status { status: 429, .. }) => {
                tracing::warn!("Gemini search quota hit (429), retrying without grounding");
                self.generate(prompt, false).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "SYS".into(),
            history: vec![
                HistoryItem { role: "user".into(), text: "Bonjour".into() },
                HistoryItem { role: "model".into(), text: "Salut !".into() },
            ],
            message: "Quelle école ?".into(),
        }
    }

    #[test]
    fn test_groq_payload_shape() {
        let payload = groq_payload(&prompt());

        assert_eq!(payload["model"], GROQ_MODEL);
        assert_eq!(payload["max_tokens"], 1024);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "SYS");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "Quelle école ?");
    }

    #[test]
    fn test_gemini_payload_with_and_without_search() {
        let payload = gemini_payload(&prompt(), true);

        assert_eq!(payload["system_instruction"]["parts"][0]["text"], "SYS");
        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "Quelle école ?");
        assert!(payload["tools"][0]["google_search"].is_object());
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(payload["generationConfig"]["topP"], 0.95);

        let payload = gemini_payload(&prompt(), false);
        assert!(payload.get("tools").is_none());
    }

    #[test]
    fn test_reply_extraction() {
        let groq = serde_json::json!({"choices": [{"message": {"content": "Réponse"}}]});
        assert_eq!(groq_reply(&groq).as_deref(), Some("Réponse"));
        assert_eq!(groq_reply(&serde_json::json!({"choices": []})), None);

        let gemini = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "Bonjour"}]}}]
        });
        assert_eq!(gemini_reply(&gemini).as_deref(), Some("Bonjour"));
        assert_eq!(gemini_reply(&serde_json::json!({})), None);
    }
}
