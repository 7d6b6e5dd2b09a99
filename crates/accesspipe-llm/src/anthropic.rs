//! Anthropic Messages API client (non-streaming)

use crate::client::{ModelClient, ModelError, ModelResult};
use crate::types::{CompletionRequest, Role};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: ANTHROPIC_API_URL.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait::async_trait]
impl ModelClient for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: CompletionRequest) -> ModelResult<String> {
        let body = AnthropicRequest {
            model: request.model.clone(),
            system: request.system.clone(),
            messages: request
                .messages
                .iter()
                .map(|t| AnthropicMessage {
                    role: match t.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    },
                    content: t.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!("anthropic request: model={} turns={}", body.model, body.messages.len());

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(e, self.timeout))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("anthropic error {}: {}", status, error_text);

            if status.as_u16() == 401 {
                return Err(ModelError::AuthFailed(error_text));
            }
            return Err(ModelError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let reply: Value = response.json().await.map_err(|e| classify(e, self.timeout))?;
        normalize_reply(&reply)
    }
}

fn classify(e: reqwest::Error, timeout: Duration) -> ModelError {
    if e.is_timeout() {
        ModelError::TimedOut(timeout.as_secs())
    } else {
        ModelError::Network(e)
    }
}

/// Extract reply text from whatever shape the endpoint returned.
///
/// Accepts a plain JSON string, a Messages API response (`content`
/// array of text blocks), or a bare object with a `text` field.
/// Anything else is a `MalformedReply` - never a placeholder string.
pub fn normalize_reply(reply: &Value) -> ModelResult<String> {
    if let Value::String(s) = reply {
        return Ok(s.clone());
    }

    if let Some(blocks) = reply.get("content").and_then(Value::as_array) {
        let text: String = blocks
            .iter()
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }

    if let Some(text) = reply.get("text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    Err(ModelError::MalformedReply(preview(reply)))
}

fn preview(reply: &Value) -> String {
    reply.to_string().chars().take(200).collect()
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    system: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}
