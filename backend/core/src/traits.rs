use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExtractionRequest, ExtractionResult};

/// Trait for text-completion backends used by the distillation client.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send a completion request and return the first choice's text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Trait for OCR backends that turn an image into ordered text entries.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from an LLM provider.
///
/// `content` is empty when the completion carried no choice or no content.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
