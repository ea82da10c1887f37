//! `menuscan-config`: MenuScan runtime configuration management.
//!
//! Provides:
//! - Typed config schema (OCR service, completion endpoint, logging)
//! - YAML read/write with a single backup
//! - `${ENV_VAR}` substitution and well-known env overrides
//! - Default value application
//! - Validation and redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides_with, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use redact::{collect_redacted_paths, redact};
pub use schema::{CompletionConfig, LoggingConfig, MenuScanConfig, OcrConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, substitute env vars, apply env overrides and defaults, and validate.
///
/// This is the main entry point for loading a config at runtime. The report is
/// returned rather than logged so callers can install a subscriber first and
/// then hand it to [`log_report`].
pub async fn load_and_prepare(path: &Path) -> Result<(MenuScanConfig, ValidationReport)> {
    let raw_config = load_config(path).await?;
    let config = prepare_with(raw_config, &std::env::vars().collect())?;
    let report = validate(&config);
    Ok((config, report))
}

/// Emit every warning and error of a validation report.
pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}

/// Run the processing pipeline on an already-parsed config against a given environment.
pub fn prepare_with(config: MenuScanConfig, env: &HashMap<String, String>) -> Result<MenuScanConfig> {
    let value = serde_json::to_value(&config).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;
    let config: MenuScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;
    let config = apply_env_overrides_with(config, env);
    Ok(apply_all_defaults(config))
}
