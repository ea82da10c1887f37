//! Config defaults: applies default values to parsed config.

use crate::schema::{CompletionConfig, LoggingConfig, MenuScanConfig};

/// Default chat-completions endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

/// Default max tokens for the distillation answer.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Default sampling temperature; low to keep answers terse and repeatable.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default currency suffix stripped from item lines.
pub const DEFAULT_CURRENCY_SUFFIX: &str = "원";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: MenuScanConfig) -> MenuScanConfig {
    let config = apply_completion_defaults(config);
    apply_logging_defaults(config)
}

fn apply_completion_defaults(mut config: MenuScanConfig) -> MenuScanConfig {
    let completion = config.completion.get_or_insert_with(CompletionConfig::default);
    if completion.api_url.is_none() {
        completion.api_url = Some(DEFAULT_COMPLETION_URL.to_string());
    }
    if completion.model.is_none() {
        completion.model = Some(DEFAULT_COMPLETION_MODEL.to_string());
    }
    completion.max_tokens.get_or_insert(DEFAULT_MAX_TOKENS);
    completion.temperature.get_or_insert(DEFAULT_TEMPERATURE);
    if completion.currency_suffix.is_none() {
        completion.currency_suffix = Some(DEFAULT_CURRENCY_SUFFIX.to_string());
    }
    config
}

fn apply_logging_defaults(mut config: MenuScanConfig) -> MenuScanConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    logging.json.get_or_insert(false);
    config
}
