//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names match; `$${VAR}` escapes to a
//!   literal `${VAR}`.
//! - Well-known variables (`CLOVA_OCR_SECRET_KEY`, `OPENAI_API_KEY`, ...)
//!   that override the matching config field when set and non-empty.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{CompletionConfig, LoggingConfig, MenuScanConfig, OcrConfig};

/// Matches `${VAR}` and its escaped form `$${VAR}`.
static ENV_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const OCR_API_URL_VAR: &str = "CLOVA_OCR_API_URL";
pub const OCR_SECRET_KEY_VAR: &str = "CLOVA_OCR_SECRET_KEY";
pub const COMPLETION_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const COMPLETION_API_URL_VAR: &str = "OPENAI_API_URL";
pub const COMPLETION_MODEL_VAR: &str = "OPENAI_MODEL";
pub const LOG_LEVEL_VAR: &str = "MENUSCAN_LOG_LEVEL";

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Only string leaves are processed. Fails if a referenced var is unset or empty.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let substituted = ENV_REF_PATTERN.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    if let Some(err) = missing {
        bail!(err);
    }
    Ok(substituted.into_owned())
}

/// Apply the well-known override variables. Empty values are ignored.
pub fn apply_env_overrides_with(
    mut config: MenuScanConfig,
    env: &HashMap<String, String>,
) -> MenuScanConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

    if let Some(url) = get(OCR_API_URL_VAR) {
        config.ocr.get_or_insert_with(OcrConfig::default).api_url = Some(url);
    }
    if let Some(secret) = get(OCR_SECRET_KEY_VAR) {
        config.ocr.get_or_insert_with(OcrConfig::default).secret_key = Some(secret);
    }
    if let Some(key) = get(COMPLETION_API_KEY_VAR) {
        config.completion.get_or_insert_with(CompletionConfig::default).api_key = Some(key);
    }
    if let Some(url) = get(COMPLETION_API_URL_VAR) {
        config.completion.get_or_insert_with(CompletionConfig::default).api_url = Some(url);
    }
    if let Some(model) = get(COMPLETION_MODEL_VAR) {
        config.completion.get_or_insert_with(CompletionConfig::default).model = Some(model);
    }
    if let Some(level) = get(LOG_LEVEL_VAR) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_nested_secret() {
        let v = json!({"ocr": {"secretKey": "${OCR_SECRET}"}});
        let result = resolve_env_vars_with(&v, &env(&[("OCR_SECRET", "abc123")])).unwrap();
        assert_eq!(result["ocr"]["secretKey"], "abc123");
    }

    #[test]
    fn substitutes_inside_larger_string() {
        let v = json!({"apiUrl": "https://${OCR_HOST}/general"});
        let result = resolve_env_vars_with(&v, &env(&[("OCR_HOST", "ocr.example.com")])).unwrap();
        assert_eq!(result["apiUrl"], "https://ocr.example.com/general");
    }

    #[test]
    fn error_names_missing_var_and_path() {
        let v = json!({"completion": {"apiKey": "${MISSING_KEY}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err().to_string();
        assert!(err.contains("MISSING_KEY"));
        assert!(err.contains("completion.apiKey"));
    }

    #[test]
    fn escaped_reference_is_kept_literally() {
        let v = json!({"note": "$${NOT_A_VAR}"});
        let result = resolve_env_vars_with(&v, &HashMap::new()).unwrap();
        assert_eq!(result["note"], "${NOT_A_VAR}");
    }

    #[test]
    fn overrides_fill_missing_sections() {
        let cfg = apply_env_overrides_with(
            MenuScanConfig::default(),
            &env(&[(OCR_SECRET_KEY_VAR, "secret"), (COMPLETION_API_KEY_VAR, "sk-test")]),
        );
        assert_eq!(cfg.ocr_secret_key(), "secret");
        assert_eq!(cfg.completion_api_key(), "sk-test");
    }

    #[test]
    fn blank_override_does_not_clobber_file_value() {
        let mut cfg = MenuScanConfig::default();
        cfg.ocr = Some(OcrConfig {
            api_url: Some("https://from-file".into()),
            secret_key: None,
        });
        let cfg = apply_env_overrides_with(cfg, &env(&[(OCR_API_URL_VAR, "  ")]));
        assert_eq!(cfg.ocr_api_url(), "https://from-file");
    }
}
