//! Log Redaction Layer
//!
//! Scrubs API keys, bearer tokens, and OCR secrets from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{16,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static OCR_SECRET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(x-ocr-secret["']?\s*[:=]\s*["']?)[^\s"',}]+"#).unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    OCR_SECRET_RE
        .replace_all(&redacted, "${1}[REDACTED_SECRET]")
        .into_owned()
}
