use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use menuscan_config::{config_dir, config_file_path, defaults, validate, MenuScanConfig};
use menuscan_core::MenuScanError;
use menuscan_logging::LoggerOptions;
use menuscan_understanding::{
    LineCleaner, MenuAnalyzer, OcrExtractionClient, OpenAiProvider, TextDistillationClient,
};

/// The config file to use: `--config` if given, else the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_file_path(&config_dir()))
}

/// Logger options from the `logging` section.
pub fn logger_options(config: &MenuScanConfig) -> LoggerOptions {
    let logging = config.logging.clone().unwrap_or_default();
    LoggerOptions {
        level: logging
            .level
            .unwrap_or_else(|| defaults::DEFAULT_LOG_LEVEL.to_string()),
        log_dir: logging
            .dir
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from),
        json_console: logging.json.unwrap_or(false),
    }
}

/// Fail with a configuration error when the config has validation errors.
pub fn ensure_valid(config: &MenuScanConfig) -> Result<(), MenuScanError> {
    let report = validate(config);
    if report.is_valid() {
        return Ok(());
    }
    let details = report
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(MenuScanError::configuration(format!("invalid configuration: {details}")))
}

pub fn build_ocr_client(config: &MenuScanConfig) -> OcrExtractionClient {
    OcrExtractionClient::new(config.ocr_api_url(), config.ocr_secret_key())
}

pub fn build_distiller(config: &MenuScanConfig) -> Result<TextDistillationClient> {
    let completion = config.completion.clone().unwrap_or_default();
    let suffix = completion
        .currency_suffix
        .unwrap_or_else(|| defaults::DEFAULT_CURRENCY_SUFFIX.to_string());
    let cleaner = LineCleaner::with_currency(&suffix)
        .with_context(|| format!("Invalid currency suffix '{suffix}'"))?;

    let provider = OpenAiProvider::new(
        completion
            .api_url
            .unwrap_or_else(|| defaults::DEFAULT_COMPLETION_URL.to_string()),
        completion.api_key.unwrap_or_default(),
    );

    Ok(TextDistillationClient::new(Arc::new(provider))
        .with_model(
            completion
                .model
                .unwrap_or_else(|| defaults::DEFAULT_COMPLETION_MODEL.to_string()),
        )
        .with_sampling(
            completion.max_tokens.unwrap_or(defaults::DEFAULT_MAX_TOKENS),
            completion.temperature.unwrap_or(defaults::DEFAULT_TEMPERATURE),
        )
        .with_cleaner(cleaner))
}

pub fn build_analyzer(config: &MenuScanConfig) -> Result<MenuAnalyzer> {
    Ok(MenuAnalyzer::new(
        Arc::new(build_ocr_client(config)),
        build_distiller(config)?,
    ))
}
