//! Config validation: field checks with user-friendly messages.

use crate::schema::MenuScanConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
///
/// Missing credentials are warnings only: the clients raise a configuration
/// error when they are actually used.
pub fn validate(config: &MenuScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_ocr(config, &mut report);
    validate_completion(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_ocr(config: &MenuScanConfig, report: &mut ValidationReport) {
    let url = config.ocr_api_url();
    if url.trim().is_empty() {
        report.warn("ocr.apiUrl", "OCR endpoint is not set; text extraction will fail");
    } else if !is_http_url(url) {
        report.error("ocr.apiUrl", format!("'{url}' is not an http(s) URL"));
    }
    if config.ocr_secret_key().trim().is_empty() {
        report.warn("ocr.secretKey", "OCR secret is not set; text extraction will fail");
    }
}

fn validate_completion(config: &MenuScanConfig, report: &mut ValidationReport) {
    if config.completion_api_key().trim().is_empty() {
        report.warn("completion.apiKey", "Completion API key is not set; menu analysis will fail");
    }
    let Some(completion) = &config.completion else { return };
    if let Some(url) = &completion.api_url {
        if !is_http_url(url) {
            report.error("completion.apiUrl", format!("'{url}' is not an http(s) URL"));
        }
    }
    if completion.max_tokens == Some(0) {
        report.error("completion.maxTokens", "maxTokens must be > 0");
    }
    if let Some(t) = completion.temperature {
        if !(0.0..=2.0).contains(&t) {
            report.error("completion.temperature", format!("temperature {t} is outside 0..=2"));
        }
    }
    if completion.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
        report.error("completion.model", "Model id cannot be empty");
    }
}

fn validate_logging(config: &MenuScanConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    // Directive strings like "menuscan=debug,info" are left to EnvFilter.
    if !level.contains('=')
        && !matches!(
            level.to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        )
    {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
