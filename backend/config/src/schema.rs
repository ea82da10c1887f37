//! MenuScan configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every field is optional so a
//! partial file (or no file at all) still loads; defaults fill the gaps.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for MenuScan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuScanConfig {
    /// OCR service endpoint and shared secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrConfig>,

    /// Text-completion endpoint used for menu distillation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

impl MenuScanConfig {
    /// OCR endpoint, empty when unset.
    pub fn ocr_api_url(&self) -> &str {
        self.ocr
            .as_ref()
            .and_then(|o| o.api_url.as_deref())
            .unwrap_or("")
    }

    /// OCR shared secret, empty when unset.
    pub fn ocr_secret_key(&self) -> &str {
        self.ocr
            .as_ref()
            .and_then(|o| o.secret_key.as_deref())
            .unwrap_or("")
    }

    /// Completion API key, empty when unset.
    pub fn completion_api_key(&self) -> &str {
        self.completion
            .as_ref()
            .and_then(|c| c.api_key.as_deref())
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Sent as the `X-OCR-SECRET` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Currency suffix stripped from recovered item lines (e.g. "원")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Emit JSON on the console as well
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_yaml() {
        let yaml = r#"
ocr:
  apiUrl: https://ocr.example.com/general
  secretKey: s3cret
completion:
  maxTokens: 500
  currencySuffix: "$"
"#;
        let cfg: MenuScanConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.ocr_api_url(), "https://ocr.example.com/general");
        assert_eq!(cfg.ocr_secret_key(), "s3cret");
        let completion = cfg.completion.unwrap();
        assert_eq!(completion.max_tokens, Some(500));
        assert_eq!(completion.currency_suffix.as_deref(), Some("$"));
    }

    #[test]
    fn missing_sections_read_as_empty() {
        let cfg = MenuScanConfig::default();
        assert_eq!(cfg.ocr_api_url(), "");
        assert_eq!(cfg.completion_api_key(), "");
    }
}
