//! Anthropic implementation of the completion provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::security::SecretString;
use crate::traits::CompletionProvider;

const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
const API_VERSION: &str = "2023-06-01";

/// Claude-backed completion provider using the Messages API.
#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
        }
    }

    /// Set the model (default: claude-3-5-sonnet-20240620).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    async fn complete(&self, instructions: &str, payload: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: instructions.to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: payload.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("Content-Type", "application/json")
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| PricingError::Llm(format!("Claude API error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PricingError::Llm(format!(
                "Claude API error: {status} - {error_text}"
            )));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| PricingError::Llm(format!("Claude API error: {e}")))?;

        completion_text(body)
    }
}

/// Pull the first text block out of a Messages API response.
fn completion_text(body: MessagesResponse) -> Result<String> {
    body.content
        .into_iter()
        .find_map(|block| block.text)
        .ok_or_else(|| PricingError::Llm("Claude returned no text content".to_string()))
}

// Request/Response types

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
