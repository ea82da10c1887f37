use std::sync::Mutex;

use async_trait::async_trait;
use menuscan_core::{LlmProvider, LlmRequest, LlmResponse, MenuScanError, Result};

/// A mock LLM provider that returns a canned answer and remembers what it was asked.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    failure: Option<(u16, String)>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Answer every request with a service error.
    pub fn with_failure(mut self, status: u16, body: impl Into<String>) -> Self {
        self.failure = Some((status, body.into()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn last_request(&self) -> Option<LlmRequest> {
        self.requests.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: &LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req.clone());
        }
        if let Some((status, body)) = &self.failure {
            return Err(MenuScanError::Service {
                service: self.name.clone(),
                status: *status,
                body: body.clone(),
            });
        }
        Ok(LlmResponse {
            content: self.fixed_response.clone().unwrap_or_default(),
            provider: self.name.clone(),
            model: req.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
