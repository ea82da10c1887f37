//! Menu-item distillation.
//!
//! Joins OCR lines into one prompt, asks a completion provider to keep only
//! food-menu item names, and recovers the names from whatever shape the
//! answer takes (see [`crate::recover`]).

use std::sync::Arc;

use menuscan_core::{DistillationResult, LlmProvider, LlmRequest, Result};
use tracing::{debug, info};

use crate::line_clean::LineCleaner;
use crate::recover::recover_items;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

pub const SYSTEM_PROMPT: &str = "You are a menu analysis expert. From the text a user provides, \
extract only the names of food menu items. Exclude prices, descriptions, categories and any \
other text. Return one menu item name per line, formatted as a JSON array of strings.";

pub const USER_PROMPT_PREFIX: &str =
    "Extract only the food menu item names from the following text:\n\n";

pub struct TextDistillationClient {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    cleaner: LineCleaner,
}

impl TextDistillationClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            cleaner: LineCleaner::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn with_cleaner(mut self, cleaner: LineCleaner) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn cleaner(&self) -> &LineCleaner {
        &self.cleaner
    }

    /// Ask the provider for the menu items among `lines`.
    ///
    /// Configuration, service and transport failures propagate unchanged. An
    /// empty or unrecognizable answer is an empty result.
    pub async fn distill(&self, lines: &[String]) -> Result<DistillationResult> {
        let request = self.build_request(lines);
        debug!(
            provider = self.provider.name(),
            model = %request.model,
            lines = lines.len(),
            "Requesting menu item distillation"
        );

        let response = self.provider.complete(&request).await?;
        let items = recover_items(&response.content, &self.cleaner);

        info!(
            provider = %response.provider,
            items = items.len(),
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Distilled menu items"
        );
        Ok(DistillationResult { items })
    }

    pub fn build_request(&self, lines: &[String]) -> LlmRequest {
        LlmRequest {
            model: self.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: build_user_prompt(lines),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// The user message: a fixed instruction followed by the escaped, newline-joined lines.
pub fn build_user_prompt(lines: &[String]) -> String {
    format!("{USER_PROMPT_PREFIX}{}", escape_prompt_text(&lines.join("\n")))
}

/// Escape backslash, double quote, newline, carriage return and tab as their
/// two-character JSON spellings. Backslash goes first so the escapes added
/// later are not doubled.
pub fn escape_prompt_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;
    use menuscan_core::MenuScanError;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn client(answer: &str) -> (Arc<MockProvider>, TextDistillationClient) {
        let provider = Arc::new(MockProvider::new("mock").with_response(answer));
        let client = TextDistillationClient::new(provider.clone());
        (provider, client)
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(
            escape_prompt_text("a\\b \"c\"\nd\re\tf"),
            r#"a\\b \"c\"\nd\re\tf"#
        );
    }

    #[test]
    fn user_prompt_joins_lines_escaped() {
        let prompt = build_user_prompt(&lines(&["김치찌개", "8,000원", "\"Special\""]));
        assert_eq!(
            prompt,
            format!("{USER_PROMPT_PREFIX}김치찌개\\n8,000원\\n\\\"Special\\\"")
        );
    }

    #[test]
    fn request_uses_configured_sampling() {
        let (_, client) = client("");
        let client = client.with_model("gpt-4o-mini").with_sampling(256, 0.0);
        let req = client.build_request(&lines(&["Bibimbap"]));
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.max_tokens, 256);
        assert_eq!(req.temperature, 0.0);
        assert_eq!(req.system_prompt, SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn json_answer_is_returned_in_order() {
        let (provider, client) = client(r#"["Kimchi","Bibimbap"]"#);
        let result = client
            .distill(&lines(&["Kimchi", "8000원", "Bibimbap", "9000원"]))
            .await
            .unwrap();
        assert_eq!(result.items, vec!["Kimchi", "Bibimbap"]);

        let sent = provider.last_request().unwrap();
        assert!(sent.user_prompt.ends_with("Kimchi\\n8000원\\nBibimbap\\n9000원"));
        assert_eq!(sent.model, DEFAULT_MODEL);
        assert_eq!(sent.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[tokio::test]
    async fn numbered_answer_is_cleaned() {
        let (_, client) = client("1. Kimchi 8000원\n2. Bibimbap");
        let result = client.distill(&lines(&["x"])).await.unwrap();
        assert_eq!(result.items, vec!["Kimchi", "Bibimbap"]);
    }

    #[tokio::test]
    async fn empty_answer_is_empty_result() {
        for answer in ["", "[]", "  "] {
            let (_, client) = client(answer);
            assert!(client.distill(&lines(&["x"])).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(MockProvider::new("mock").with_failure(503, "overloaded"));
        let client = TextDistillationClient::new(provider);
        let err = client.distill(&lines(&["x"])).await.unwrap_err();
        assert!(matches!(err, MenuScanError::Service { status: 503, .. }));
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn custom_cleaner_is_used() {
        let (_, client) = client("Burger 12$\nFries 4$");
        let client = client.with_cleaner(LineCleaner::with_currency("$").unwrap());
        let result = client.distill(&lines(&["x"])).await.unwrap();
        assert_eq!(result.items, vec!["Burger", "Fries"]);
    }
}
