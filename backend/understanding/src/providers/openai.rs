use std::time::Instant;

use async_trait::async_trait;
use menuscan_core::{LlmProvider, LlmRequest, LlmResponse, MenuScanError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Service label used in errors and logs.
pub const COMPLETION_SERVICE: &str = "completion";

/// OpenAI-compatible chat completion provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenAiProvider {
    /// `api_url` is the full chat-completions endpoint, not a base URL.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_url: api_url.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(MenuScanError::configuration(
                "completion API key is not set; configure completion.apiKey or OPENAI_API_KEY",
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(MenuScanError::configuration(
                "completion endpoint is not set; configure completion.apiUrl or OPENAI_API_URL",
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        self.ensure_configured()?;
        let start = Instant::now();

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(model = %request.model, "Sending request to completion endpoint");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MenuScanError::io(COMPLETION_SERVICE, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MenuScanError::io(COMPLETION_SERVICE, e))?;

        if status != StatusCode::OK {
            return Err(MenuScanError::Service {
                service: COMPLETION_SERVICE.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            MenuScanError::io(COMPLETION_SERVICE, format!("malformed completion response: {e}"))
        })?;

        // A missing choice or content is an empty answer, not an error.
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let tokens_used = serde_json::from_value::<Usage>(json["usage"].clone())
            .ok()
            .and_then(|u| u.total_tokens)
            .unwrap_or(0);

        Ok(LlmResponse {
            content,
            provider: "openai".to_string(),
            model: json["model"]
                .as_str()
                .unwrap_or(&request.model)
                .to_string(),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
